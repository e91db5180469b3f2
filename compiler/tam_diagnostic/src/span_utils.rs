//! Line and column lookup for byte offsets.

/// Compute 1-based (line, column) from a byte offset.
///
/// The column counts characters, not bytes, from the start of the line.
/// Offsets past the end of `source` resolve to the position after the
/// last character.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    let offset = (offset as usize).min(source.len());
    let mut line = 1u32;
    let mut line_start = 0usize;

    for (i, byte) in source.bytes().enumerate().take(offset) {
        if byte == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }

    let col = source
        .get(line_start..offset)
        .map_or(0, |text| text.chars().count());

    (line, u32::try_from(col).unwrap_or(u32::MAX).saturating_add(1))
}

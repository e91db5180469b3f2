//! Diagnostics for parse errors.
//!
//! A diagnostic carries:
//! - An error code for searchability
//! - A message (what went wrong)
//! - The span of the offending token (where it went wrong)
//!
//! Rendering is the one-line `"<line>:<column>: <message>"` form that the
//! driver prints under `parser errors:`.

pub mod span_utils;

use std::fmt;

use tam_ir::Span;

/// Error codes for parse-time diagnostics.
///
/// Format: E#### where the first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // ===== Lexer Errors (E0xxx) =====
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,

    // ===== Parser Errors (E1xxx) =====
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A located parse error.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: u32,
    /// 1-based column (in characters) of `span.start`.
    pub column: u32,
}

impl Diagnostic {
    /// Build a diagnostic, resolving the span's line and column in `source`.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span, source: &str) -> Self {
        let (line, column) = span_utils::offset_to_line_col(source, span.start);
        Diagnostic {
            code,
            message: message.into(),
            span,
            line,
            column,
        }
    }

    /// Render the `"<line>:<column>: <message>"` form.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

//! Stack growth for the recursive parser and evaluator.
//!
//! Both the Pratt parser and the tree-walking evaluator recurse once per
//! nesting level of the guest program, and guest recursion (`fn` calling
//! itself) recurses the host. Wrapping those entry points in
//! [`ensure_sufficient_stack`] moves execution onto a freshly allocated
//! segment whenever the current one runs low.
//!
//! On `wasm32` the guard is a passthrough.

/// Grow when less than this much stack is left (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// within [`RED_ZONE`] of its end.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

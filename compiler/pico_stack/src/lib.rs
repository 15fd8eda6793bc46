//! Stack growth guard for the recursive stages of the pipeline.
//!
//! The parser descends once per nested expression, the compiler once per
//! nested node, and every script-level call re-enters the compiled closure
//! tree. A cartridge with deeply nested tables or a recursive function can
//! therefore exhaust the native stack long before it hits the runtime's
//! call-depth limit. Wrapping those entry points in [`ensure_sufficient_stack`]
//! moves the work onto a freshly allocated segment when the remaining space
//! runs low.
//!
//! On `wasm32` the guard is a plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; wasm manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

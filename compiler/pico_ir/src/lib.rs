//! Pico IR - shared syntax types for the pico scripting pipeline.
//!
//! This crate holds everything the parser hands to the compiler:
//! - `Span` and `LineIndex` for source locations and diagnostics
//! - The typed syntax tree (`Block`, `Stmt`, `Expr` and their kinds)
//! - Operator enums (`BinaryOp`, `UnaryOp`)
//!
//! It has no dependencies so that tooling can inspect a parsed cartridge
//! without pulling in the runtime.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
mod span;

pub use ast::{
    BinaryOp, Block, CondBlock, Expr, ExprKind, Field, FieldKind, FunctionBody, FunctionName,
    Ident, Stmt, StmtKind, UnaryOp,
};
pub use span::{LineIndex, Span, Spanned};

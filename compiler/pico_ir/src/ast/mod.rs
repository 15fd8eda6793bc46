//! Typed syntax tree.
//!
//! Nodes own their children (`Box`/`Vec`); a cartridge is parsed once per
//! `evaluate` call and compiled straight away, so no arena is needed.
//!
//! Every node carries a `Span` and exposes `kind_name()` so the compiler can
//! report the offending node in a `CompileError`.

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, Field, FieldKind, FunctionBody};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{Block, CondBlock, FunctionName, Stmt, StmtKind};

use std::fmt;

use crate::{Span, Spanned};

/// An identifier occurrence with its location.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:?}", self.name, self.span)
    }
}

impl Spanned for Ident {
    fn span(&self) -> Span {
        self.span
    }
}

#[cfg(test)]
mod tests;

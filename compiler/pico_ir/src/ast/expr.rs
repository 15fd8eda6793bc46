//! Expression nodes.

use std::fmt;

use super::{BinaryOp, Block, Ident, UnaryOp};
use crate::{Span, Spanned};

/// Expression node.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Only calls can produce more than one value.
    pub fn is_multi_valued(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::FunctionCall { .. } | ExprKind::PropertyCall { .. }
        )
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression kinds.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),

    /// `...` inside a variadic function.
    RestArgument,

    /// Plain name: local slot, upvalue or global.
    Identifier(String),

    /// `object.name`
    PropertyIndex { object: Box<Expr>, name: Ident },

    /// `object[key]`
    ExpressionIndex { object: Box<Expr>, key: Box<Expr> },

    /// `function (params) body end`
    Lambda(Box<FunctionBody>),

    /// `callee(args)`
    FunctionCall { callee: Box<Expr>, args: Vec<Expr> },

    /// `receiver:name(args)`
    PropertyCall {
        receiver: Box<Expr>,
        name: Ident,
        args: Vec<Expr>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Unary { op: UnaryOp, operand: Box<Expr> },

    /// `{ fields }`
    Table(Vec<Field>),

    /// `(expr)`, which truncates a multi-valued expression to one value.
    Paren(Box<Expr>),
}

impl ExprKind {
    /// Node name used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            ExprKind::Nil => "nil literal",
            ExprKind::Boolean(_) => "boolean literal",
            ExprKind::Number(_) => "number literal",
            ExprKind::String(_) => "string literal",
            ExprKind::RestArgument => "rest argument",
            ExprKind::Identifier(_) => "identifier",
            ExprKind::PropertyIndex { .. } => "property index",
            ExprKind::ExpressionIndex { .. } => "expression index",
            ExprKind::Lambda(_) => "function expression",
            ExprKind::FunctionCall { .. } => "function call",
            ExprKind::PropertyCall { .. } => "method call",
            ExprKind::Binary { .. } => "binary operation",
            ExprKind::Unary { .. } => "unary operation",
            ExprKind::Table(_) => "table constructor",
            ExprKind::Paren(_) => "parenthesized expression",
        }
    }
}

/// A table constructor field.
#[derive(Clone, PartialEq, Debug)]
pub struct Field {
    pub kind: FieldKind,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub enum FieldKind {
    /// `value`, stored at the next sequential integer key.
    Positional(Expr),
    /// `name = value`
    Named { name: Ident, value: Expr },
    /// `[key] = value`
    Computed { key: Expr, value: Expr },
}

/// Parameters and body shared by lambdas and function declarations.
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionBody {
    pub params: Vec<Ident>,
    pub is_variadic: bool,
    pub body: Block,
    pub span: Span,
}

impl Spanned for FunctionBody {
    fn span(&self) -> Span {
        self.span
    }
}

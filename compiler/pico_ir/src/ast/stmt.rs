//! Statement Types

use std::fmt;

use super::{Expr, FunctionBody, Ident};
use crate::{Span, Spanned};

/// A sequence of statements sharing one lexical scope.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Block { stmts, span }
    }
}

/// Statement node.
#[derive(Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// `cond then body` arm of an `if` chain.
#[derive(Clone, PartialEq, Debug)]
pub struct CondBlock {
    pub condition: Expr,
    pub body: Block,
}

/// Name of a `function a.b.c:m()` declaration.
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionName {
    /// `a.b.c`; never empty.
    pub path: Vec<Ident>,
    /// `:m`, which adds an implicit `self` parameter.
    pub method: Option<Ident>,
}

/// Statement kinds.
#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    /// Empty statement (`;`)
    Null,

    /// `local a, b = e1, e2`
    LocalDeclaration {
        names: Vec<Ident>,
        values: Vec<Expr>,
    },

    /// `local function f() end`
    LocalFunctionDeclaration { name: Ident, body: FunctionBody },

    /// `function a.b:c() end`
    FunctionDeclaration {
        name: FunctionName,
        body: FunctionBody,
    },

    /// `t1, t2 = e1, e2`
    Assignment {
        targets: Vec<Expr>,
        values: Vec<Expr>,
    },

    /// A call used as a statement.
    Call(Expr),

    Return(Vec<Expr>),

    If {
        clauses: Vec<CondBlock>,
        else_block: Option<Block>,
    },

    /// `do ... end`
    Block(Block),

    While { condition: Expr, body: Block },

    Repeat { body: Block, condition: Expr },

    Break,

    /// `for k, v in explist do ... end`
    ForIn {
        names: Vec<Ident>,
        values: Vec<Expr>,
        body: Block,
    },

    /// `for i = start, limit[, step] do ... end`
    For {
        var: Ident,
        start: Expr,
        limit: Expr,
        step: Option<Expr>,
        body: Block,
    },

    Goto(Ident),

    Label(Ident),
}

impl StmtKind {
    /// Node name used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            StmtKind::Null => "empty statement",
            StmtKind::LocalDeclaration { .. } => "local declaration",
            StmtKind::LocalFunctionDeclaration { .. } => "local function declaration",
            StmtKind::FunctionDeclaration { .. } => "function declaration",
            StmtKind::Assignment { .. } => "assignment",
            StmtKind::Call(_) => "call statement",
            StmtKind::Return(_) => "return statement",
            StmtKind::If { .. } => "if statement",
            StmtKind::Block(_) => "do block",
            StmtKind::While { .. } => "while loop",
            StmtKind::Repeat { .. } => "repeat loop",
            StmtKind::Break => "break statement",
            StmtKind::ForIn { .. } => "generic for loop",
            StmtKind::For { .. } => "numeric for loop",
            StmtKind::Goto(_) => "goto statement",
            StmtKind::Label(_) => "label",
        }
    }
}

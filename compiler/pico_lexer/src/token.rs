//! Token types handed to the parser.

use std::fmt;

use pico_ir::{Span, Spanned};

/// A token with its source location.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

/// Token kinds after escape processing and number conversion.
#[derive(Clone, PartialEq, Debug)]
pub enum TokenKind {
    // Literals
    Number(f64),
    Str(String),
    Ident(String),

    // Keywords
    And,
    Break,
    Do,
    Else,
    Elseif,
    End,
    False,
    For,
    Function,
    Goto,
    If,
    In,
    Local,
    Nil,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    True,
    Until,
    While,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Hash,
    EqEq,
    /// `~=` and its `!=` spelling.
    NotEq,
    LtEq,
    GtEq,
    Lt,
    Gt,
    Eq,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    DoubleColon,
    Comma,
    Dot,
    DotDot,
    Ellipsis,

    Eof,
}

impl TokenKind {
    /// Human-readable description for "expected X, found Y" messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number(_) => "number",
            TokenKind::Str(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::And => "`and`",
            TokenKind::Break => "`break`",
            TokenKind::Do => "`do`",
            TokenKind::Else => "`else`",
            TokenKind::Elseif => "`elseif`",
            TokenKind::End => "`end`",
            TokenKind::False => "`false`",
            TokenKind::For => "`for`",
            TokenKind::Function => "`function`",
            TokenKind::Goto => "`goto`",
            TokenKind::If => "`if`",
            TokenKind::In => "`in`",
            TokenKind::Local => "`local`",
            TokenKind::Nil => "`nil`",
            TokenKind::Not => "`not`",
            TokenKind::Or => "`or`",
            TokenKind::Repeat => "`repeat`",
            TokenKind::Return => "`return`",
            TokenKind::Then => "`then`",
            TokenKind::True => "`true`",
            TokenKind::Until => "`until`",
            TokenKind::While => "`while`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Caret => "`^`",
            TokenKind::Hash => "`#`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`~=`",
            TokenKind::LtEq => "`<=`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::Eq => "`=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::DoubleColon => "`::`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::DotDot => "`..`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::Eof => "end of file",
        }
    }

    /// Tokens that close a block.
    pub fn is_block_end(&self) -> bool {
        matches!(
            self,
            TokenKind::End | TokenKind::Else | TokenKind::Elseif | TokenKind::Until | TokenKind::Eof
        )
    }
}

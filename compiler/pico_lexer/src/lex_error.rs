//! Lexer errors.

use pico_ir::Span;
use thiserror::Error;

/// A lexer error with the span it covers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }
}

/// What went wrong while tokenizing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),
    #[error("malformed number `{0}`")]
    MalformedNumber(String),
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
}

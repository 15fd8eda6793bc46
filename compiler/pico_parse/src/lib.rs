//! Recursive descent parser for pico cartridge sources.
//!
//! `parse` lexes and parses a whole chunk into a `pico_ir::Block`. The
//! parser is purely syntactic: whether an assignment target is assignable
//! or a `break` sits inside a loop is left to the compiler.

mod cursor;
mod grammar;

use std::fmt;

use pico_ir::{Block, LineIndex, Span};
use pico_lexer::LexError;
use thiserror::Error;

use cursor::Cursor;

/// Parse error with its location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    /// Human-readable message.
    pub message: String,
    /// Location of the error.
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// Render as `line:col: message` against the source it came from.
    pub fn display_with<'a>(&'a self, index: &'a LineIndex) -> impl fmt::Display + 'a {
        Located {
            message: &self.message,
            span: self.span,
            index,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.kind.to_string(), err.span)
    }
}

struct Located<'a> {
    message: &'a str,
    span: Span,
    index: &'a LineIndex,
}

impl fmt::Display for Located<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, col) = self.index.line_col(self.span.start);
        write!(f, "{line}:{col}: {}", self.message)
    }
}

/// Parser state.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [pico_lexer::Token]) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }
}

/// Parse a complete chunk.
#[tracing::instrument(level = "trace", skip(source), fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Block, ParseError> {
    let tokens = pico_lexer::lex(source)?;
    let mut parser = Parser::new(&tokens);
    let block = parser.parse_chunk()?;
    tracing::trace!(stmts = block.stmts.len(), "parsed chunk");
    Ok(block)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

//! Grammar productions, split by syntactic category.

mod expr;
mod stmt;

use pico_ir::{Block, Span};
use pico_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse the top-level chunk and require end of input.
    pub(crate) fn parse_chunk(&mut self) -> Result<Block, ParseError> {
        let block = self.parse_block()?;
        if !self.cursor.is_at_end() {
            return Err(self.cursor.unexpected("statement"));
        }
        Ok(block)
    }

    /// Parse statements until a block terminator (`end`, `else`, `elseif`,
    /// `until` or end of input). A `return` must be the last statement.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let start = self.cursor.current_span();
        let mut stmts = Vec::new();

        while !self.cursor.current_kind().is_block_end() {
            if self.cursor.check(&TokenKind::Return) {
                stmts.push(self.parse_return()?);
                if !self.cursor.current_kind().is_block_end() {
                    return Err(self.cursor.unexpected("end of block after `return`"));
                }
                break;
            }
            stmts.push(self.parse_stmt()?);
        }

        let end = self.cursor.previous_span();
        let span = if stmts.is_empty() {
            Span::point(start.start)
        } else {
            start.merge(end)
        };
        Ok(Block::new(stmts, span))
    }

    /// Span from `start` to the last consumed token.
    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.merge(self.cursor.previous_span())
    }
}

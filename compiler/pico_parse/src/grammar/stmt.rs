//! Statement parsing.

use pico_ir::{CondBlock, Expr, ExprKind, FunctionName, Ident, Stmt, StmtKind};
use pico_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::Semicolon => {
                self.cursor.advance();
                StmtKind::Null
            }
            TokenKind::If => self.parse_if()?,
            TokenKind::While => {
                self.cursor.advance();
                let condition = self.parse_expr()?;
                self.cursor.expect(&TokenKind::Do)?;
                let body = self.parse_block()?;
                self.cursor.expect(&TokenKind::End)?;
                StmtKind::While { condition, body }
            }
            TokenKind::Do => {
                self.cursor.advance();
                let body = self.parse_block()?;
                self.cursor.expect(&TokenKind::End)?;
                StmtKind::Block(body)
            }
            TokenKind::For => self.parse_for()?,
            TokenKind::Repeat => {
                self.cursor.advance();
                let body = self.parse_block()?;
                self.cursor.expect(&TokenKind::Until)?;
                let condition = self.parse_expr()?;
                StmtKind::Repeat { body, condition }
            }
            TokenKind::Function => self.parse_function_decl()?,
            TokenKind::Local => self.parse_local()?,
            TokenKind::Break => {
                self.cursor.advance();
                StmtKind::Break
            }
            TokenKind::Goto => {
                self.cursor.advance();
                StmtKind::Goto(self.parse_ident()?)
            }
            TokenKind::DoubleColon => {
                self.cursor.advance();
                let label = self.parse_ident()?;
                self.cursor.expect(&TokenKind::DoubleColon)?;
                StmtKind::Label(label)
            }
            _ => self.parse_expr_stmt()?,
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    pub(crate) fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(&TokenKind::Return)?;
        let values = if self.cursor.current_kind().is_block_end()
            || self.cursor.check(&TokenKind::Semicolon)
        {
            Vec::new()
        } else {
            self.parse_expr_list()?
        };
        self.cursor.eat(&TokenKind::Semicolon);
        Ok(Stmt::new(StmtKind::Return(values), self.span_from(start)))
    }

    pub(crate) fn parse_ident(&mut self) -> Result<Ident, ParseError> {
        let (name, span) = self.cursor.expect_ident()?;
        Ok(Ident::new(name, span))
    }

    fn parse_ident_list(&mut self) -> Result<Vec<Ident>, ParseError> {
        let mut names = vec![self.parse_ident()?];
        while self.cursor.eat(&TokenKind::Comma) {
            names.push(self.parse_ident()?);
        }
        Ok(names)
    }

    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.expect(&TokenKind::If)?;
        let mut clauses = vec![self.parse_cond_block()?];
        let mut else_block = None;
        loop {
            if self.cursor.eat(&TokenKind::Elseif) {
                clauses.push(self.parse_cond_block()?);
            } else if self.cursor.eat(&TokenKind::Else) {
                else_block = Some(self.parse_block()?);
                self.cursor.expect(&TokenKind::End)?;
                break;
            } else {
                self.cursor.expect(&TokenKind::End)?;
                break;
            }
        }
        Ok(StmtKind::If {
            clauses,
            else_block,
        })
    }

    fn parse_cond_block(&mut self) -> Result<CondBlock, ParseError> {
        let condition = self.parse_expr()?;
        self.cursor.expect(&TokenKind::Then)?;
        let body = self.parse_block()?;
        Ok(CondBlock { condition, body })
    }

    fn parse_for(&mut self) -> Result<StmtKind, ParseError> {
        self.cursor.expect(&TokenKind::For)?;
        let first = self.parse_ident()?;

        if self.cursor.eat(&TokenKind::Eq) {
            let start = self.parse_expr()?;
            self.cursor.expect(&TokenKind::Comma)?;
            let limit = self.parse_expr()?;
            let step = if self.cursor.eat(&TokenKind::Comma) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            self.cursor.expect(&TokenKind::Do)?;
            let body = self.parse_block()?;
            self.cursor.expect(&TokenKind::End)?;
            return Ok(StmtKind::For {
                var: first,
                start,
                limit,
                step,
                body,
            });
        }

        let mut names = vec![first];
        while self.cursor.eat(&TokenKind::Comma) {
            names.push(self.parse_ident()?);
        }
        self.cursor.expect(&TokenKind::In)?;
        let values = self.parse_expr_list()?;
        self.cursor.expect(&TokenKind::Do)?;
        let body = self.parse_block()?;
        self.cursor.expect(&TokenKind::End)?;
        Ok(StmtKind::ForIn {
            names,
            values,
            body,
        })
    }

    fn parse_function_decl(&mut self) -> Result<StmtKind, ParseError> {
        let start = self.cursor.expect(&TokenKind::Function)?;
        let mut path = vec![self.parse_ident()?];
        while self.cursor.eat(&TokenKind::Dot) {
            path.push(self.parse_ident()?);
        }
        let method = if self.cursor.eat(&TokenKind::Colon) {
            Some(self.parse_ident()?)
        } else {
            None
        };
        let body = self.parse_function_body(start)?;
        Ok(StmtKind::FunctionDeclaration {
            name: FunctionName { path, method },
            body,
        })
    }

    fn parse_local(&mut self) -> Result<StmtKind, ParseError> {
        let start = self.cursor.expect(&TokenKind::Local)?;
        if self.cursor.eat(&TokenKind::Function) {
            let name = self.parse_ident()?;
            let body = self.parse_function_body(start)?;
            return Ok(StmtKind::LocalFunctionDeclaration { name, body });
        }

        let names = self.parse_ident_list()?;
        let values = if self.cursor.eat(&TokenKind::Eq) {
            self.parse_expr_list()?
        } else {
            Vec::new()
        };
        Ok(StmtKind::LocalDeclaration { names, values })
    }

    /// Assignment or call statement; both start with a suffixed expression.
    fn parse_expr_stmt(&mut self) -> Result<StmtKind, ParseError> {
        let first = self.parse_suffixed_expr()?;

        if self.cursor.check(&TokenKind::Eq) || self.cursor.check(&TokenKind::Comma) {
            let mut targets = vec![first];
            while self.cursor.eat(&TokenKind::Comma) {
                targets.push(self.parse_suffixed_expr()?);
            }
            self.cursor.expect(&TokenKind::Eq)?;
            let values = self.parse_expr_list()?;
            return Ok(StmtKind::Assignment { targets, values });
        }

        if is_call(&first) {
            Ok(StmtKind::Call(first))
        } else {
            Err(ParseError::new(
                format!(
                    "{} is not a statement; expected assignment or call",
                    first.kind.kind_name()
                ),
                first.span,
            ))
        }
    }
}

fn is_call(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::FunctionCall { .. } | ExprKind::PropertyCall { .. }
    )
}

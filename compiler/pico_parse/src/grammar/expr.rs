//! Expression parsing.
//!
//! Binary operators use precedence climbing driven by
//! `BinaryOp::binding_power`; unary operators bind tighter than every
//! binary operator except `^`.

use pico_ir::{BinaryOp, Expr, ExprKind, Field, FieldKind, FunctionBody, Ident, Span, UnaryOp};
use pico_lexer::TokenKind;
use pico_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(0)
    }

    pub(crate) fn parse_expr_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![self.parse_expr()?];
        while self.cursor.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    fn parse_binary(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut lhs = match unary_op(self.cursor.current_kind()) {
                Some(op) => {
                    let start = self.cursor.advance().span;
                    let operand = self.parse_binary(UnaryOp::PRECEDENCE)?;
                    let span = start.merge(operand.span);
                    Expr::new(
                        ExprKind::Unary {
                            op,
                            operand: Box::new(operand),
                        },
                        span,
                    )
                }
                None => self.parse_simple_expr()?,
            };

            while let Some(op) = binary_op(self.cursor.current_kind()) {
                let (left_bp, right_bp) = op.binding_power();
                if left_bp < min_bp {
                    break;
                }
                self.cursor.advance();
                let rhs = self.parse_binary(right_bp)?;
                let span = lhs.span.merge(rhs.span);
                lhs = Expr::new(
                    ExprKind::Binary {
                        op,
                        left: Box::new(lhs),
                        right: Box::new(rhs),
                    },
                    span,
                );
            }

            Ok(lhs)
        })
    }

    fn parse_simple_expr(&mut self) -> Result<Expr, ParseError> {
        let token = self.cursor.current();
        let kind = match &token.kind {
            TokenKind::Nil => ExprKind::Nil,
            TokenKind::True => ExprKind::Boolean(true),
            TokenKind::False => ExprKind::Boolean(false),
            TokenKind::Number(n) => ExprKind::Number(*n),
            TokenKind::Str(s) => ExprKind::String(s.clone()),
            TokenKind::Ellipsis => ExprKind::RestArgument,
            TokenKind::Function => {
                self.cursor.advance();
                let body = self.parse_function_body(token.span)?;
                let span = body.span;
                return Ok(Expr::new(ExprKind::Lambda(Box::new(body)), span));
            }
            TokenKind::LBrace => return self.parse_table(),
            _ => return self.parse_suffixed_expr(),
        };
        self.cursor.advance();
        Ok(Expr::new(kind, token.span))
    }

    /// `Name` or `( expr )`.
    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.cursor.advance().span;
                Ok(Expr::new(ExprKind::Identifier(name.clone()), span))
            }
            TokenKind::LParen => {
                let start = self.cursor.advance().span;
                let inner = self.parse_expr()?;
                self.cursor.expect(&TokenKind::RParen)?;
                Ok(Expr::new(
                    ExprKind::Paren(Box::new(inner)),
                    self.span_from(start),
                ))
            }
            _ => Err(self.cursor.unexpected("expression")),
        }
    }

    /// Primary expression followed by any chain of `.name`, `[key]`,
    /// `:name(args)` and call suffixes.
    pub(crate) fn parse_suffixed_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary_expr()?;
        let start = expr.span;

        loop {
            let kind = match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    let name = self.parse_ident()?;
                    ExprKind::PropertyIndex {
                        object: Box::new(expr),
                        name,
                    }
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let key = self.parse_expr()?;
                    self.cursor.expect(&TokenKind::RBracket)?;
                    ExprKind::ExpressionIndex {
                        object: Box::new(expr),
                        key: Box::new(key),
                    }
                }
                TokenKind::Colon => {
                    self.cursor.advance();
                    let name = self.parse_ident()?;
                    let args = self.parse_call_args()?;
                    ExprKind::PropertyCall {
                        receiver: Box::new(expr),
                        name,
                        args,
                    }
                }
                TokenKind::LParen | TokenKind::Str(_) | TokenKind::LBrace => {
                    let args = self.parse_call_args()?;
                    ExprKind::FunctionCall {
                        callee: Box::new(expr),
                        args,
                    }
                }
                _ => return Ok(expr),
            };
            expr = Expr::new(kind, self.span_from(start));
        }
    }

    /// `( [explist] )`, a table constructor, or a string literal.
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::LParen => {
                self.cursor.advance();
                let args = if self.cursor.check(&TokenKind::RParen) {
                    Vec::new()
                } else {
                    self.parse_expr_list()?
                };
                self.cursor.expect(&TokenKind::RParen)?;
                Ok(args)
            }
            TokenKind::LBrace => Ok(vec![self.parse_table()?]),
            TokenKind::Str(s) => {
                let span = self.cursor.advance().span;
                Ok(vec![Expr::new(ExprKind::String(s.clone()), span)])
            }
            _ => Err(self.cursor.unexpected("function arguments")),
        }
    }

    fn parse_table(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.expect(&TokenKind::LBrace)?;
        let mut fields = Vec::new();

        while !self.cursor.check(&TokenKind::RBrace) {
            fields.push(self.parse_field()?);
            if !(self.cursor.eat(&TokenKind::Comma) || self.cursor.eat(&TokenKind::Semicolon)) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::Table(fields), self.span_from(start)))
    }

    fn parse_field(&mut self) -> Result<Field, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.cursor.current_kind() {
            TokenKind::LBracket => {
                self.cursor.advance();
                let key = self.parse_expr()?;
                self.cursor.expect(&TokenKind::RBracket)?;
                self.cursor.expect(&TokenKind::Eq)?;
                let value = self.parse_expr()?;
                FieldKind::Computed { key, value }
            }
            TokenKind::Ident(_) if matches!(self.cursor.peek_next_kind(), TokenKind::Eq) => {
                let name = self.parse_ident()?;
                self.cursor.advance();
                let value = self.parse_expr()?;
                FieldKind::Named { name, value }
            }
            _ => FieldKind::Positional(self.parse_expr()?),
        };
        Ok(Field {
            kind,
            span: self.span_from(start),
        })
    }

    /// `( params ) block end`, after the `function` keyword and name.
    pub(crate) fn parse_function_body(&mut self, start: Span) -> Result<FunctionBody, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let mut params: Vec<Ident> = Vec::new();
        let mut is_variadic = false;

        if !self.cursor.check(&TokenKind::RParen) {
            loop {
                if self.cursor.eat(&TokenKind::Ellipsis) {
                    is_variadic = true;
                    break;
                }
                params.push(self.parse_ident()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect(&TokenKind::RParen)?;

        let body = self.parse_block()?;
        self.cursor.expect(&TokenKind::End)?;
        Ok(FunctionBody {
            params,
            is_variadic,
            body,
            span: self.span_from(start),
        })
    }
}

fn unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Not => Some(UnaryOp::Not),
        TokenKind::Hash => Some(UnaryOp::Len),
        TokenKind::Minus => Some(UnaryOp::Neg),
        _ => None,
    }
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::DotDot => BinaryOp::Concat,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Caret => BinaryOp::Pow,
        _ => return None,
    })
}

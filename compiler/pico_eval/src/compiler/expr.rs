//! Expression compilation.

use std::rc::Rc;

use pico_ir::{BinaryOp, Expr, ExprKind, Field, FieldKind, FunctionBody};
use pico_stack::ensure_sufficient_stack;
use pico_value::{to_bool, MultiValue, Table, Value};

use super::{Compiler, FunctionState, Resolved};
use crate::exec::{call_value, expr_fn, index_value, multi_fn, Closure, ExprFn, MultiFn, Proto};
use crate::{evaluate_binary, evaluate_unary, CompileError};

/// Last element of an expression list.
enum Tail {
    Single(ExprFn),
    Multi(MultiFn),
}

enum FieldFn {
    Positional(ExprFn),
    /// Trailing call whose values all become positional entries.
    Spread(MultiFn),
    Keyed(ExprFn, ExprFn),
}

impl Compiler {
    /// Compile an expression to a single-valued closure.
    pub(super) fn compile_expr(&mut self, expr: &Expr) -> Result<ExprFn, CompileError> {
        ensure_sufficient_stack(|| self.compile_expr_inner(expr))
    }

    fn compile_expr_inner(&mut self, expr: &Expr) -> Result<ExprFn, CompileError> {
        Ok(match &expr.kind {
            ExprKind::Nil => expr_fn(|_| Ok(Value::Nil)),
            ExprKind::Boolean(b) => {
                let b = *b;
                expr_fn(move |_| Ok(Value::Bool(b)))
            }
            ExprKind::Number(n) => {
                let n = *n;
                expr_fn(move |_| Ok(Value::Number(n)))
            }
            ExprKind::String(s) => {
                let value = Value::string(s);
                expr_fn(move |_| Ok(value.clone()))
            }
            ExprKind::RestArgument => {
                if !self.current().is_variadic {
                    return Err(CompileError::new(
                        "cannot use `...` outside a variadic function",
                        expr.kind.kind_name(),
                        expr.span,
                    ));
                }
                expr_fn(|frame| Ok(frame.varargs.clone().map_or(Value::Nil, Value::Table)))
            }
            ExprKind::Identifier(name) => self.compile_read(name),
            ExprKind::PropertyIndex { object, name } => {
                let what = self.describe(object);
                let object = self.compile_expr(object)?;
                let key = Value::string(&name.name);
                expr_fn(move |frame| index_value(&object(frame)?, &key, &what))
            }
            ExprKind::ExpressionIndex { object, key } => {
                let what = self.describe(object);
                let object = self.compile_expr(object)?;
                let key = self.compile_expr(key)?;
                expr_fn(move |frame| {
                    let object = object(frame)?;
                    let key = key(frame)?;
                    index_value(&object, &key, &what)
                })
            }
            ExprKind::Lambda(body) => self.compile_function(body, "anonymous".to_string(), false)?,
            ExprKind::FunctionCall { .. } | ExprKind::PropertyCall { .. } => {
                let call = self.compile_call(expr)?;
                expr_fn(move |frame| Ok(call(frame)?.into_first()))
            }
            ExprKind::Binary { op, left, right } => self.compile_binary(*op, left, right)?,
            ExprKind::Unary { op, operand } => {
                let op = *op;
                let operand = self.compile_expr(operand)?;
                expr_fn(move |frame| evaluate_unary(op, &operand(frame)?))
            }
            ExprKind::Table(fields) => self.compile_table(fields)?,
            ExprKind::Paren(inner) => self.compile_expr(inner)?,
        })
    }

    fn compile_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<ExprFn, CompileError> {
        let left = self.compile_expr(left)?;
        let right = self.compile_expr(right)?;
        Ok(match op {
            BinaryOp::Or => expr_fn(move |frame| {
                let value = left(frame)?;
                if to_bool(&value) {
                    Ok(value)
                } else {
                    right(frame)
                }
            }),
            BinaryOp::And => expr_fn(move |frame| {
                let value = left(frame)?;
                if to_bool(&value) {
                    right(frame)
                } else {
                    Ok(value)
                }
            }),
            _ => expr_fn(move |frame| {
                let a = left(frame)?;
                let b = right(frame)?;
                evaluate_binary(op, &a, &b)
            }),
        })
    }

    /// Read of a plain name.
    pub(super) fn compile_read(&mut self, name: &str) -> ExprFn {
        match self.resolve(name) {
            Resolved::Local(slot) => expr_fn(move |frame| Ok(frame.slots[slot].borrow().clone())),
            Resolved::Upvalue(index) => {
                expr_fn(move |frame| Ok(frame.upvalues[index].borrow().clone()))
            }
            Resolved::Global => {
                let key = Value::string(name);
                expr_fn(move |frame| Ok(frame.ctx.globals.borrow().get(&key)))
            }
        }
    }

    /// Compile a call expression to a closure returning all its values.
    ///
    /// Method calls evaluate the receiver once and pass it as the first
    /// argument.
    pub(super) fn compile_call(&mut self, expr: &Expr) -> Result<MultiFn, CompileError> {
        match &expr.kind {
            ExprKind::FunctionCall { callee, args } => {
                let what = self.describe(callee);
                let callee = self.compile_expr(callee)?;
                let args = self.compile_expr_list(args)?;
                Ok(multi_fn(move |frame| {
                    let callee = callee(frame)?;
                    let args = args(frame)?;
                    call_value(&callee, args, &what)
                }))
            }
            ExprKind::PropertyCall {
                receiver,
                name,
                args,
            } => {
                let receiver_what = self.describe(receiver);
                let what = format!("method '{}'", name.name);
                let receiver = self.compile_expr(receiver)?;
                let key = Value::string(&name.name);
                let args = self.compile_expr_list(args)?;
                Ok(multi_fn(move |frame| {
                    let receiver = receiver(frame)?;
                    let method = index_value(&receiver, &key, &receiver_what)?;
                    let mut all = MultiValue::single(receiver);
                    all.extend_from(args(frame)?);
                    call_value(&method, all, &what)
                }))
            }
            other => Err(CompileError::new(
                format!("expected a call, found {}", other.kind_name()),
                other.kind_name(),
                expr.span,
            )),
        }
    }

    /// Compile an expression list with multi-value flattening: every
    /// expression but the last yields one value, a trailing call yields all
    /// of its values.
    pub(super) fn compile_expr_list(&mut self, exprs: &[Expr]) -> Result<MultiFn, CompileError> {
        let Some((last, init)) = exprs.split_last() else {
            return Ok(multi_fn(|_| Ok(MultiValue::new())));
        };

        let heads = init
            .iter()
            .map(|e| self.compile_expr(e))
            .collect::<Result<Vec<_>, _>>()?;
        let tail = if last.is_multi_valued() {
            Tail::Multi(self.compile_call(last)?)
        } else {
            Tail::Single(self.compile_expr(last)?)
        };

        Ok(multi_fn(move |frame| {
            let mut values = MultiValue::new();
            for head in &heads {
                values.push(head(frame)?);
            }
            match &tail {
                Tail::Single(f) => values.push(f(frame)?),
                Tail::Multi(f) => values.extend_from(f(frame)?),
            }
            Ok(values)
        }))
    }

    fn compile_table(&mut self, fields: &[Field]) -> Result<ExprFn, CompileError> {
        let count = fields.len();
        let mut compiled = Vec::with_capacity(count);
        for (i, field) in fields.iter().enumerate() {
            compiled.push(match &field.kind {
                FieldKind::Positional(value) if i + 1 == count && value.is_multi_valued() => {
                    FieldFn::Spread(self.compile_call(value)?)
                }
                FieldKind::Positional(value) => FieldFn::Positional(self.compile_expr(value)?),
                FieldKind::Named { name, value } => {
                    let key = Value::string(&name.name);
                    FieldFn::Keyed(
                        expr_fn(move |_| Ok(key.clone())),
                        self.compile_expr(value)?,
                    )
                }
                FieldKind::Computed { key, value } => {
                    FieldFn::Keyed(self.compile_expr(key)?, self.compile_expr(value)?)
                }
            });
        }

        Ok(expr_fn(move |frame| {
            let table = Table::new_ref();
            let mut index = 1.0;
            for field in &compiled {
                match field {
                    FieldFn::Positional(value) => {
                        let value = value(frame)?;
                        table.borrow_mut().set(&Value::Number(index), value)?;
                        index += 1.0;
                    }
                    FieldFn::Spread(values) => {
                        for value in values(frame)? {
                            table.borrow_mut().set(&Value::Number(index), value)?;
                            index += 1.0;
                        }
                    }
                    FieldFn::Keyed(key, value) => {
                        let key = key(frame)?;
                        let value = value(frame)?;
                        table.borrow_mut().set(&key, value)?;
                    }
                }
            }
            Ok(Value::Table(table))
        }))
    }

    /// Compile a function body; the result builds a closure capturing the
    /// current frame's cells.
    pub(super) fn compile_function(
        &mut self,
        body: &FunctionBody,
        name: String,
        has_self: bool,
    ) -> Result<ExprFn, CompileError> {
        self.functions.push(FunctionState::new(name, body.is_variadic));
        if has_self {
            self.declare_local("self");
        }
        for param in &body.params {
            self.declare_local(&param.name);
        }
        let stmts = self.compile_stmts(&body.body.stmts)?;
        let state = self.pop_function();

        tracing::trace!(
            function = %state.name,
            slots = state.slot_count,
            upvalues = state.upvalues.len(),
            "compiled function"
        );

        let proto = Rc::new(Proto {
            name: state.name,
            param_count: body.params.len() + usize::from(has_self),
            is_variadic: body.is_variadic,
            slot_count: state.slot_count,
            upvalues: state.upvalues.into_iter().map(|(_, source)| source).collect(),
            body: stmts,
        });

        Ok(expr_fn(move |frame| {
            let upvalues = frame.capture(&proto.upvalues);
            let closure = Closure::new(Rc::clone(&proto), upvalues, Rc::clone(&frame.ctx));
            Ok(Value::Function(Rc::new(closure)))
        }))
    }

    pub(super) fn describe_name(&self, name: &str) -> String {
        match self.peek(name) {
            Resolved::Local(_) => format!("local '{name}'"),
            Resolved::Upvalue(_) => format!("upvalue '{name}'"),
            Resolved::Global => format!("global '{name}'"),
        }
    }

    /// Short description of an expression for runtime error messages.
    pub(super) fn describe(&self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Identifier(name) => self.describe_name(name),
            ExprKind::PropertyIndex { name, .. } => format!("field '{}'", name.name),
            ExprKind::PropertyCall { name, .. } => format!("method '{}'", name.name),
            _ => String::new(),
        }
    }
}

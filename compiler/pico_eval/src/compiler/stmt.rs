//! Statement compilation.

use pico_ir::{Block, Expr, ExprKind, FunctionBody, FunctionName, Ident, Stmt, StmtKind};
use pico_value::{to_bool, to_number, MultiValue, Value};

use super::{Compiler, Resolved};
use crate::exec::{
    assign_fn, call_value, index_value, new_cell, run_block, set_index, stmt_fn, AssignFn, Flow,
    StmtFn,
};
use crate::CompileError;

/// Run a loop body and translate its flow for the enclosing loop.
macro_rules! loop_body {
    ($body:expr, $frame:expr) => {
        match run_block($body, $frame)? {
            Flow::Normal => {}
            Flow::Break => break,
            Flow::Return(values) => return Ok(Flow::Return(values)),
        }
    };
}

impl Compiler {
    /// Compile statements into the current scope.
    pub(super) fn compile_stmts(&mut self, stmts: &[Stmt]) -> Result<Vec<StmtFn>, CompileError> {
        let mut out = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            if let Some(compiled) = self.compile_stmt(stmt)? {
                out.push(compiled);
            }
        }
        Ok(out)
    }

    /// Compile a block in a fresh child scope.
    fn compile_block(&mut self, block: &Block) -> Result<Vec<StmtFn>, CompileError> {
        self.push_scope();
        let stmts = self.compile_stmts(&block.stmts);
        self.pop_scope();
        stmts
    }

    fn compile_loop_block(&mut self, block: &Block) -> Result<Vec<StmtFn>, CompileError> {
        self.enter_loop();
        let stmts = self.compile_block(block);
        self.exit_loop();
        stmts
    }

    /// `None` for statements that compile to nothing.
    fn compile_stmt(&mut self, stmt: &Stmt) -> Result<Option<StmtFn>, CompileError> {
        let compiled = match &stmt.kind {
            StmtKind::Null => return Ok(None),
            StmtKind::LocalDeclaration { names, values } => {
                let values = self.compile_expr_list(values)?;
                let slots: Vec<usize> = names.iter().map(|n| self.declare_local(&n.name)).collect();
                stmt_fn(move |frame| {
                    let values = values(frame)?;
                    for (k, &slot) in slots.iter().enumerate() {
                        frame.slots[slot] = new_cell(values.pluck(k));
                    }
                    Ok(Flow::Normal)
                })
            }
            StmtKind::LocalFunctionDeclaration { name, body } => {
                let slot = self.declare_local(&name.name);
                let make = self.compile_function(body, name.name.clone(), false)?;
                stmt_fn(move |frame| {
                    // The closure captures the new cell so it can call itself.
                    frame.slots[slot] = new_cell(Value::Nil);
                    let function = make(frame)?;
                    *frame.slots[slot].borrow_mut() = function;
                    Ok(Flow::Normal)
                })
            }
            StmtKind::FunctionDeclaration { name, body } => self.compile_function_decl(name, body)?,
            StmtKind::Assignment { targets, values } => {
                let values = self.compile_expr_list(values)?;
                let targets = targets
                    .iter()
                    .map(|t| self.compile_target(t))
                    .collect::<Result<Vec<_>, _>>()?;
                stmt_fn(move |frame| {
                    let values = values(frame)?;
                    for (k, target) in targets.iter().enumerate() {
                        target(frame, values.pluck(k))?;
                    }
                    Ok(Flow::Normal)
                })
            }
            StmtKind::Call(expr) => {
                let call = self.compile_call(expr)?;
                stmt_fn(move |frame| {
                    call(frame)?;
                    Ok(Flow::Normal)
                })
            }
            StmtKind::Return(values) => {
                let values = self.compile_expr_list(values)?;
                stmt_fn(move |frame| Ok(Flow::Return(values(frame)?)))
            }
            StmtKind::If {
                clauses,
                else_block,
            } => {
                let mut arms = Vec::with_capacity(clauses.len());
                for clause in clauses {
                    let condition = self.compile_expr(&clause.condition)?;
                    arms.push((condition, self.compile_block(&clause.body)?));
                }
                let otherwise = else_block
                    .as_ref()
                    .map(|b| self.compile_block(b))
                    .transpose()?;
                stmt_fn(move |frame| {
                    for (condition, body) in &arms {
                        if to_bool(&condition(frame)?) {
                            return run_block(body, frame);
                        }
                    }
                    match &otherwise {
                        Some(body) => run_block(body, frame),
                        None => Ok(Flow::Normal),
                    }
                })
            }
            StmtKind::Block(block) => {
                let body = self.compile_block(block)?;
                stmt_fn(move |frame| run_block(&body, frame))
            }
            StmtKind::While { condition, body } => {
                let condition = self.compile_expr(condition)?;
                let body = self.compile_loop_block(body)?;
                stmt_fn(move |frame| {
                    while to_bool(&condition(frame)?) {
                        loop_body!(&body, frame);
                    }
                    Ok(Flow::Normal)
                })
            }
            StmtKind::Repeat { body, condition } => {
                // The condition sees the body's locals.
                self.push_scope();
                self.enter_loop();
                let stmts = self.compile_stmts(&body.stmts);
                self.exit_loop();
                let condition = stmts.and_then(|s| Ok((s, self.compile_expr(condition)?)));
                self.pop_scope();
                let (body, condition) = condition?;
                stmt_fn(move |frame| {
                    loop {
                        loop_body!(&body, frame);
                        if to_bool(&condition(frame)?) {
                            break;
                        }
                    }
                    Ok(Flow::Normal)
                })
            }
            StmtKind::Break => {
                if self.current().loop_depth == 0 {
                    return Err(CompileError::new(
                        "`break` outside a loop",
                        stmt.kind.kind_name(),
                        stmt.span,
                    ));
                }
                stmt_fn(|_| Ok(Flow::Break))
            }
            StmtKind::ForIn {
                names,
                values,
                body,
            } => self.compile_for_in(names, values, body)?,
            StmtKind::For {
                var,
                start,
                limit,
                step,
                body,
            } => self.compile_numeric_for(&var.name, start, limit, step.as_ref(), body)?,
            StmtKind::Goto(_) | StmtKind::Label(_) => {
                return Err(CompileError::new(
                    format!("cannot compile {}", stmt.kind.kind_name()),
                    stmt.kind.kind_name(),
                    stmt.span,
                ));
            }
        };
        Ok(Some(compiled))
    }

    /// `function a.b.c:m() end`
    fn compile_function_decl(
        &mut self,
        name: &FunctionName,
        body: &FunctionBody,
    ) -> Result<StmtFn, CompileError> {
        let Some((first, rest)) = name.path.split_first() else {
            return Err(CompileError::new(
                "function declaration without a name",
                "function declaration",
                body.span,
            ));
        };

        let mut qualified = name.path.iter().map(|i| i.as_str()).collect::<Vec<_>>().join(".");
        if let Some(method) = &name.method {
            qualified = format!("{qualified}:{}", method.name);
        }
        let make = self.compile_function(body, qualified, name.method.is_some())?;

        if rest.is_empty() && name.method.is_none() {
            let assign = self.compile_assign_name(&first.name);
            return Ok(stmt_fn(move |frame| {
                let function = make(frame)?;
                assign(frame, function)?;
                Ok(Flow::Normal)
            }));
        }

        // Walk `a.b` and store into the final field.
        let mut fields: Vec<&str> = rest.iter().map(|i| i.as_str()).collect();
        if let Some(method) = &name.method {
            fields.push(method.as_str());
        }
        let last = fields.pop().unwrap_or_default();

        let base = self.compile_read(&first.name);
        let mut what = self.describe_name(&first.name);
        let mut steps: Vec<(Value, String)> = Vec::with_capacity(fields.len());
        for field in fields {
            steps.push((Value::string(field), what));
            what = format!("field '{field}'");
        }
        let key = Value::string(last);

        Ok(stmt_fn(move |frame| {
            let mut object = base(frame)?;
            for (key, what) in &steps {
                object = index_value(&object, key, what)?;
            }
            let function = make(frame)?;
            set_index(&object, &key, function, &what)?;
            Ok(Flow::Normal)
        }))
    }

    /// Compile an assignment target.
    fn compile_target(&mut self, target: &Expr) -> Result<AssignFn, CompileError> {
        Ok(match &target.kind {
            ExprKind::Identifier(name) => self.compile_assign_name(name),
            ExprKind::PropertyIndex { object, name } => {
                let what = self.describe(object);
                let object = self.compile_expr(object)?;
                let key = Value::string(&name.name);
                assign_fn(move |frame, value| set_index(&object(frame)?, &key, value, &what))
            }
            ExprKind::ExpressionIndex { object, key } => {
                let what = self.describe(object);
                let object = self.compile_expr(object)?;
                let key = self.compile_expr(key)?;
                assign_fn(move |frame, value| {
                    let object = object(frame)?;
                    let key = key(frame)?;
                    set_index(&object, &key, value, &what)
                })
            }
            other => {
                return Err(CompileError::new(
                    format!("cannot assign to {}", other.kind_name()),
                    other.kind_name(),
                    target.span,
                ))
            }
        })
    }

    /// Assignment to a plain name: nearest local or upvalue, else global.
    fn compile_assign_name(&mut self, name: &str) -> AssignFn {
        match self.resolve(name) {
            Resolved::Local(slot) => assign_fn(move |frame, value| {
                *frame.slots[slot].borrow_mut() = value;
                Ok(())
            }),
            Resolved::Upvalue(index) => assign_fn(move |frame, value| {
                *frame.upvalues[index].borrow_mut() = value;
                Ok(())
            }),
            Resolved::Global => {
                let key = Value::string(name);
                assign_fn(move |frame, value| frame.ctx.globals.borrow_mut().set(&key, value))
            }
        }
    }

    /// `for a, b in explist do ... end`
    ///
    /// The list is evaluated once into an iterator function, a state value
    /// and an initial control value. Each round calls the iterator with the
    /// state and the previous first result; the loop ends when the first
    /// result is nil.
    fn compile_for_in(
        &mut self,
        names: &[Ident],
        values: &[Expr],
        body: &Block,
    ) -> Result<StmtFn, CompileError> {
        let init = self.compile_expr_list(values)?;

        self.push_scope();
        let slots: Vec<usize> = names.iter().map(|n| self.declare_local(&n.name)).collect();
        let body = self.compile_loop_block(body);
        self.pop_scope();
        let body = body?;

        Ok(stmt_fn(move |frame| {
            let init = init(frame)?;
            let iterator = init.pluck(0);
            let state = init.pluck(1);
            let mut control = init.pluck(2);
            loop {
                let args = MultiValue::from(vec![state.clone(), control.clone()]);
                let results = call_value(&iterator, args, "for iterator")?;
                control = results.first();
                if control.is_nil() {
                    break;
                }
                for (k, &slot) in slots.iter().enumerate() {
                    frame.slots[slot] = new_cell(results.pluck(k));
                }
                loop_body!(&body, frame);
            }
            Ok(Flow::Normal)
        }))
    }

    /// `for i = start, limit[, step] do ... end`
    ///
    /// Bounds are evaluated and coerced to numbers once. The loop runs while
    /// `(step > 0 and i <= limit) or (step <= 0 and i >= limit)` and
    /// advances by `step`.
    fn compile_numeric_for(
        &mut self,
        var: &str,
        start: &Expr,
        limit: &Expr,
        step: Option<&Expr>,
        body: &Block,
    ) -> Result<StmtFn, CompileError> {
        let start = self.compile_expr(start)?;
        let limit = self.compile_expr(limit)?;
        let step = step.map(|s| self.compile_expr(s)).transpose()?;

        self.push_scope();
        let slot = self.declare_local(var);
        let body = self.compile_loop_block(body);
        self.pop_scope();
        let body = body?;

        Ok(stmt_fn(move |frame| {
            let mut counter = to_number(&start(frame)?, true)?;
            let limit = to_number(&limit(frame)?, true)?;
            let step = match &step {
                Some(step) => to_number(&step(frame)?, true)?,
                None => 1.0,
            };
            let in_range = |i: f64| if step > 0.0 { i <= limit } else { i >= limit };

            while in_range(counter) {
                frame.slots[slot] = new_cell(Value::Number(counter));
                loop_body!(&body, frame);
                counter += step;
            }
            Ok(Flow::Normal)
        }))
    }
}

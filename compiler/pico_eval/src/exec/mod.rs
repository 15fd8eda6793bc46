//! Execution structures shared by compiled code.
//!
//! The compiler turns the syntax tree into nested boxed closures over a
//! `Frame`. Each local variable lives in its own `Cell` so closures can
//! capture it by reference; a fresh cell is allocated every time a `local`
//! statement runs.

use std::cell::RefCell;
use std::rc::Rc;

use pico_stack::ensure_sufficient_stack;
use pico_value::{
    stack_overflow, type_error, type_of, Callable, MultiValue, RuntimeResult, Table, TableRef,
    Value,
};

/// Storage for one local variable.
pub(crate) type Cell = Rc<RefCell<Value>>;

pub(crate) fn new_cell(value: Value) -> Cell {
    Rc::new(RefCell::new(value))
}

/// How a statement finished.
#[derive(Debug)]
pub(crate) enum Flow {
    Normal,
    Break,
    Return(MultiValue),
}

pub(crate) type ExprFn = Box<dyn Fn(&mut Frame) -> RuntimeResult<Value>>;
pub(crate) type MultiFn = Box<dyn Fn(&mut Frame) -> RuntimeResult<MultiValue>>;
pub(crate) type StmtFn = Box<dyn Fn(&mut Frame) -> RuntimeResult<Flow>>;
pub(crate) type AssignFn = Box<dyn Fn(&mut Frame, Value) -> RuntimeResult<()>>;

pub(crate) fn expr_fn(f: impl Fn(&mut Frame) -> RuntimeResult<Value> + 'static) -> ExprFn {
    Box::new(f)
}

pub(crate) fn multi_fn(f: impl Fn(&mut Frame) -> RuntimeResult<MultiValue> + 'static) -> MultiFn {
    Box::new(f)
}

pub(crate) fn stmt_fn(f: impl Fn(&mut Frame) -> RuntimeResult<Flow> + 'static) -> StmtFn {
    Box::new(f)
}

pub(crate) fn assign_fn(f: impl Fn(&mut Frame, Value) -> RuntimeResult<()> + 'static) -> AssignFn {
    Box::new(f)
}

/// State shared by every closure created under one runtime.
pub(crate) struct Context {
    pub globals: TableRef,
    depth: std::cell::Cell<usize>,
    max_depth: usize,
}

impl Context {
    pub fn new(globals: TableRef, max_depth: usize) -> Self {
        Context {
            globals,
            depth: std::cell::Cell::new(0),
            max_depth,
        }
    }

    /// Count one more active script call.
    fn enter(&self) -> RuntimeResult<DepthGuard<'_>> {
        let depth = self.depth.get();
        if depth >= self.max_depth {
            return Err(stack_overflow(self.max_depth));
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard(self))
    }
}

struct DepthGuard<'a>(&'a Context);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.depth.set(self.0.depth.get().saturating_sub(1));
    }
}

/// Where a closure's captured variable comes from in the enclosing frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum UpvalueSource {
    Local(usize),
    Upvalue(usize),
}

/// Compiled function body, shared by every closure instance made from it.
pub(crate) struct Proto {
    pub name: String,
    /// Declared parameters, including an implicit `self`.
    pub param_count: usize,
    pub is_variadic: bool,
    pub slot_count: usize,
    pub upvalues: Vec<UpvalueSource>,
    pub body: Vec<StmtFn>,
}

/// Activation record of one call.
pub(crate) struct Frame {
    pub slots: Vec<Cell>,
    pub upvalues: Rc<[Cell]>,
    /// Surplus arguments of a variadic function.
    pub varargs: Option<TableRef>,
    pub ctx: Rc<Context>,
}

impl Frame {
    /// Capture the cells a new closure needs from this frame.
    pub fn capture(&self, sources: &[UpvalueSource]) -> Rc<[Cell]> {
        sources
            .iter()
            .map(|source| match *source {
                UpvalueSource::Local(slot) => Rc::clone(&self.slots[slot]),
                UpvalueSource::Upvalue(index) => Rc::clone(&self.upvalues[index]),
            })
            .collect()
    }
}

/// A script function value.
pub(crate) struct Closure {
    proto: Rc<Proto>,
    upvalues: Rc<[Cell]>,
    ctx: Rc<Context>,
}

impl Closure {
    pub fn new(proto: Rc<Proto>, upvalues: Rc<[Cell]>, ctx: Rc<Context>) -> Self {
        Closure {
            proto,
            upvalues,
            ctx,
        }
    }

    fn invoke(&self, args: MultiValue) -> RuntimeResult<MultiValue> {
        let proto = &*self.proto;
        let mut args = args.into_iter();

        let mut slots = Vec::with_capacity(proto.slot_count.max(proto.param_count));
        for _ in 0..proto.param_count {
            slots.push(new_cell(args.next().unwrap_or_default()));
        }
        slots.resize_with(proto.slot_count.max(proto.param_count), || new_cell(Value::Nil));

        let varargs = proto
            .is_variadic
            .then(|| Rc::new(RefCell::new(Table::from_sequence(args))));

        let mut frame = Frame {
            slots,
            upvalues: Rc::clone(&self.upvalues),
            varargs,
            ctx: Rc::clone(&self.ctx),
        };

        match run_block(&proto.body, &mut frame)? {
            Flow::Return(values) => Ok(values),
            Flow::Normal | Flow::Break => Ok(MultiValue::new()),
        }
    }
}

impl Callable for Closure {
    fn call(&self, args: MultiValue) -> RuntimeResult<MultiValue> {
        let _guard = self.ctx.enter()?;
        ensure_sufficient_stack(|| self.invoke(args))
    }

    fn name(&self) -> &str {
        &self.proto.name
    }
}

/// Run statements in order, stopping at the first non-normal flow.
pub(crate) fn run_block(stmts: &[StmtFn], frame: &mut Frame) -> RuntimeResult<Flow> {
    for stmt in stmts {
        match stmt(frame)? {
            Flow::Normal => {}
            flow => return Ok(flow),
        }
    }
    Ok(Flow::Normal)
}

/// Call a value, failing unless it is a function.
///
/// `what` names the callee for the error message and may be empty.
pub(crate) fn call_value(callee: &Value, args: MultiValue, what: &str) -> RuntimeResult<MultiValue> {
    match callee {
        Value::Function(f) => f.call(args),
        other => Err(type_error(with_context(
            format!("attempt to call a {} value", type_of(other)),
            what,
        ))),
    }
}

/// `object[key]` for reads.
pub(crate) fn index_value(object: &Value, key: &Value, what: &str) -> RuntimeResult<Value> {
    match object {
        Value::Table(t) => Ok(t.borrow().get(key)),
        other => Err(type_error(with_context(
            format!("attempt to index a {} value", type_of(other)),
            what,
        ))),
    }
}

/// `object[key] = value`.
pub(crate) fn set_index(object: &Value, key: &Value, value: Value, what: &str) -> RuntimeResult<()> {
    match object {
        Value::Table(t) => t.borrow_mut().set(key, value),
        other => Err(type_error(with_context(
            format!("attempt to index a {} value", type_of(other)),
            what,
        ))),
    }
}

fn with_context(message: String, what: &str) -> String {
    if what.is_empty() {
        message
    } else {
        format!("{message} ({what})")
    }
}

//! Shared helpers for script tests.

use std::cell::RefCell;
use std::rc::Rc;

use pico_eval::{library, Error, MultiValue, Runtime, Value};

/// Runtime with the small host library the tests rely on:
/// `count(t)` and `record(...)`, which appends its arguments to the
/// returned log.
pub fn runtime() -> (Runtime, Rc<RefCell<Vec<Value>>>) {
    let runtime = Runtime::new();
    runtime.define_fn("count", |args| match args.first() {
        Value::Table(t) => Ok(MultiValue::single(Value::Number(t.borrow().count() as f64))),
        other => Err(library("count", format!("expected a table, got {}", other.type_tag()))),
    });

    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    runtime.define_fn("record", move |args| {
        sink.borrow_mut().extend(args);
        Ok(MultiValue::new())
    });
    (runtime, log)
}

pub fn eval(source: &str) -> Result<MultiValue, Error> {
    runtime().0.evaluate(source)
}

/// Evaluate and return every value the chunk returned.
pub fn eval_ok(source: &str) -> Vec<Value> {
    match eval(source) {
        Ok(values) => values.into_vec(),
        Err(err) => panic!("script failed: {err}\n{source}"),
    }
}

/// Evaluate and return the first returned value.
pub fn eval_one(source: &str) -> Value {
    eval_ok(source).into_iter().next().unwrap_or_default()
}

pub fn eval_err(source: &str) -> Error {
    match eval(source) {
        Ok(values) => panic!("expected an error, got {:?}\n{source}", values.into_vec()),
        Err(err) => err,
    }
}

/// Run a script and return what it passed to `record`.
pub fn recorded(source: &str) -> Vec<Value> {
    let (runtime, log) = runtime();
    if let Err(err) = runtime.evaluate(source) {
        panic!("script failed: {err}\n{source}");
    }
    let values = log.borrow().clone();
    values
}

pub fn num(n: f64) -> Value {
    Value::Number(n)
}

pub fn nums(ns: &[f64]) -> Vec<Value> {
    ns.iter().copied().map(Value::Number).collect()
}

pub fn s(text: &str) -> Value {
    Value::string(text)
}

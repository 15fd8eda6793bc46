//! Error kinds surfaced to the host.

use crate::common::{eval_err, runtime};
use pico_eval::{Error, Execution, MultiValue, Runtime, RuntimeError, TypeTag};
use pretty_assertions::assert_eq;

#[test]
fn calling_nil_names_the_global() {
    assert_eq!(
        eval_err("missing()"),
        Error::Runtime(RuntimeError::Type(
            "attempt to call a nil value (global 'missing')".to_string()
        ))
    );
}

#[test]
fn calling_a_field() {
    assert_eq!(
        eval_err("local t = {} t.go()"),
        Error::Runtime(RuntimeError::Type(
            "attempt to call a nil value (field 'go')".to_string()
        ))
    );
}

#[test]
fn calling_a_missing_method() {
    assert_eq!(
        eval_err("local t = {} t:go()"),
        Error::Runtime(RuntimeError::Type(
            "attempt to call a nil value (method 'go')".to_string()
        ))
    );
}

#[test]
fn length_of_number() {
    assert_eq!(
        eval_err("return #5"),
        Error::Runtime(RuntimeError::Type(
            "attempt to get length of a number value".to_string()
        ))
    );
}

#[test]
fn comparison_of_booleans() {
    assert_eq!(
        eval_err("return true < false"),
        Error::Runtime(RuntimeError::Comparison {
            op: "<",
            left: TypeTag::Boolean,
            right: TypeTag::Boolean,
        })
    );
}

#[test]
fn parse_errors() {
    assert!(matches!(eval_err("local = 1"), Error::Parse(_)));
    assert!(matches!(eval_err("x = 'unterminated"), Error::Parse(_)));
    assert!(matches!(eval_err("1 + 2"), Error::Parse(_)));
}

#[test]
fn compile_errors() {
    assert!(matches!(eval_err("goto continue"), Error::Compile(_)));
    assert!(matches!(eval_err("break"), Error::Compile(_)));
}

#[test]
fn runaway_recursion_overflows() {
    let err = eval_err("local function f() return f() + 1 end return f()");
    assert_eq!(err, Error::Runtime(RuntimeError::StackOverflow { limit: 200 }));
}

#[test]
fn runtime_usable_after_error() {
    let (runtime, _) = runtime();
    assert!(runtime.evaluate("error_here()").is_err());
    runtime.evaluate("function ok() return 1 end").unwrap();
    assert_eq!(
        runtime.execute("ok", MultiValue::new()).unwrap().first(),
        pico_eval::Value::Number(1.0)
    );
}

#[test]
fn absent_is_not_nil() {
    let runtime = Runtime::new();
    let result = runtime.execute("nonexistent", MultiValue::new()).unwrap();
    assert_eq!(result, Execution::Absent);
    assert_ne!(result, Execution::Returned(MultiValue::single(pico_eval::Value::Nil)));
}

#[test]
fn errors_display_with_location() {
    let source = "x = 1\nlocal = 2";
    let err = eval_err(source);
    let index = pico_ir::LineIndex::new(source);
    assert!(err.display_with(&index).to_string().starts_with("2:"));
}

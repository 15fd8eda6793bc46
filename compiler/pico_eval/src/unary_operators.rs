//! Unary operator implementations.

use pico_ir::UnaryOp;
use pico_value::{to_bool, to_number, type_error, type_of, RuntimeResult, Value};

/// Evaluate a unary operation.
///
/// Negation coerces non-strictly, so `-"x"` is `-0` rather than an error.
pub fn evaluate_unary(op: UnaryOp, value: &Value) -> RuntimeResult<Value> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!to_bool(value))),
        UnaryOp::Neg => Ok(Value::Number(-to_number(value, false)?)),
        UnaryOp::Len => match value {
            Value::Table(t) => Ok(Value::Number(t.borrow().count() as f64)),
            Value::Str(s) => Ok(Value::Number(s.chars().count() as f64)),
            other => Err(cannot_get_length(other)),
        },
    }
}

#[cold]
fn cannot_get_length(value: &Value) -> pico_value::RuntimeError {
    type_error(format!("attempt to get length of a {} value", type_of(value)))
}

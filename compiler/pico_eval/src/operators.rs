//! Binary operator implementations.
//!
//! Direct enum-based dispatch over `BinaryOp`. Relational operators require
//! both operands to share a type that is a number or a string; arithmetic
//! coerces both sides strictly; concatenation goes through `to_string`.

use std::cmp::Ordering;

use pico_ir::BinaryOp;
use pico_value::{comparison, to_bool, to_number, to_string, type_of, RuntimeResult, Value};

/// Evaluate a binary operation on two already-evaluated operands.
///
/// `and`/`or` are short-circuited by the compiler; they are handled here on
/// eager operands so the function is total over `BinaryOp`.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> RuntimeResult<Value> {
    match op {
        BinaryOp::Or if to_bool(left) => Ok(left.clone()),
        BinaryOp::Or => Ok(right.clone()),
        BinaryOp::And if to_bool(left) => Ok(right.clone()),
        BinaryOp::And => Ok(left.clone()),

        BinaryOp::Eq => Ok(Value::Bool(left.raw_equals(right))),
        BinaryOp::NotEq => Ok(Value::Bool(!left.raw_equals(right))),

        BinaryOp::Lt => compare(op, left, right).map(|o| Value::Bool(o == Ordering::Less)),
        BinaryOp::Gt => compare(op, left, right).map(|o| Value::Bool(o == Ordering::Greater)),
        BinaryOp::LtEq => compare(op, left, right).map(|o| Value::Bool(o != Ordering::Greater)),
        BinaryOp::GtEq => compare(op, left, right).map(|o| Value::Bool(o != Ordering::Less)),

        BinaryOp::Concat => {
            let mut out = to_string(left)?;
            out.push_str(&to_string(right)?);
            Ok(Value::from(out))
        }

        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Pow => {
            let a = to_number(left, true)?;
            let b = to_number(right, true)?;
            Ok(Value::Number(arith(op, a, b)))
        }
    }
}

fn arith(op: BinaryOp, a: f64, b: f64) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        // Truncated remainder: the result takes the sign of the dividend.
        BinaryOp::Mod => a % b,
        BinaryOp::Pow => a.powf(b),
        _ => f64::NAN,
    }
}

/// Order two values of the same orderable type.
///
/// NaN operands compare as unordered, which makes every relational
/// operator false except `~=`.
fn compare(op: BinaryOp, left: &Value, right: &Value) -> RuntimeResult<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(a.partial_cmp(b).unwrap_or(match op {
            // Pick the ordering that makes this operator false.
            BinaryOp::Lt | BinaryOp::LtEq => Ordering::Greater,
            _ => Ordering::Less,
        })),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        _ => Err(comparison(op.as_symbol(), type_of(left), type_of(right))),
    }
}

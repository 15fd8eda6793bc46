//! Type classification and coercions shared by operators and host functions.

use std::fmt;

use crate::{coercion, RuntimeResult, Value};

/// Runtime type classification, as reported by `type()`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Nil,
    Boolean,
    Number,
    String,
    Table,
    Function,
}

impl TypeTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeTag::Nil => "nil",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Table => "table",
            TypeTag::Function => "function",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn type_of(value: &Value) -> TypeTag {
    match value {
        Value::Nil => TypeTag::Nil,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Number(_) => TypeTag::Number,
        Value::Str(_) => TypeTag::String,
        Value::Table(_) => TypeTag::Table,
        Value::Function(_) => TypeTag::Function,
    }
}

/// Only `nil` and `false` are falsy.
#[inline]
pub fn to_bool(value: &Value) -> bool {
    !matches!(value, Value::Nil | Value::Bool(false))
}

/// Numeric coercion.
///
/// Strings convert only when they are unsigned decimal integers
/// (`^[0-9]+$`); `"-1"` and `"1.5"` do not. Anything else is an error when
/// `strict`, otherwise `0`.
pub fn to_number(value: &Value, strict: bool) -> RuntimeResult<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Str(s) if is_unsigned_integer(s) => Ok(parse_digits(s)),
        _ if strict => Err(coercion(type_of(value), "number")),
        _ => Ok(0.0),
    }
}

fn is_unsigned_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digits(s: &str) -> f64 {
    s.bytes()
        .fold(0.0, |acc, digit| acc * 10.0 + f64::from(digit - b'0'))
}

/// String coercion: numbers and booleans format canonically, strings pass
/// through, everything else is an error.
pub fn to_string(value: &Value) -> RuntimeResult<String> {
    match value {
        Value::Bool(_) | Value::Number(_) | Value::Str(_) => Ok(value.to_string()),
        _ => Err(coercion(type_of(value), "string")),
    }
}

#[cfg(test)]
mod tests;

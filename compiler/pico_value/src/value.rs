//! Dynamic values.

use std::fmt;
use std::rc::Rc;

use crate::{Callable, NativeFunction, MultiValue, RuntimeResult, Table, TableRef, TypeTag};

/// A script value.
///
/// Tables and functions are shared by reference; cloning a `Value` clones
/// the handle, never the contents.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Table(TableRef),
    Function(Rc<dyn Callable>),
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// Create a fresh empty table value.
    pub fn new_table() -> Self {
        Value::Table(Table::new_ref())
    }

    /// Wrap a host function.
    pub fn native(
        name: impl Into<String>,
        func: impl Fn(MultiValue) -> RuntimeResult<MultiValue> + 'static,
    ) -> Self {
        NativeFunction::new(name, func).into_value()
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn type_tag(&self) -> TypeTag {
        crate::type_of(self)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableRef> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Rc<dyn Callable>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Script-level equality: different types are never equal, tables and
    /// functions compare by identity.
    pub fn raw_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => fn_ptr(a) == fn_ptr(b),
            _ => false,
        }
    }
}

/// Thin pointer of a callable, used for identity.
pub(crate) fn fn_ptr(f: &Rc<dyn Callable>) -> *const () {
    Rc::as_ptr(f).cast::<()>()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.raw_equals(other)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<TableRef> for Value {
    fn from(t: TableRef) -> Self {
        Value::Table(t)
    }
}

/// Format a number the way scripts print it: integral values without a
/// fractional part.
pub(crate) fn format_number(n: f64, f: &mut impl fmt::Write) -> fmt::Result {
    if n.is_nan() {
        f.write_str("nan")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "inf" } else { "-inf" })
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => format_number(*n, f),
            Value::Str(s) => f.write_str(s),
            Value::Table(t) => write!(f, "table: {}", t.borrow().id()),
            Value::Function(func) => write!(f, "function: {}", func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Table(t) => match t.try_borrow() {
                Ok(table) => write!(f, "Table(#{} count={})", table.id(), table.count()),
                Err(_) => f.write_str("Table(<borrowed>)"),
            },
            Value::Function(func) => write!(f, "Function({})", func.name()),
        }
    }
}

#[cfg(test)]
mod tests;

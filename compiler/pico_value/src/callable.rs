//! The seam between compiled script functions and host functions.

use std::fmt;
use std::rc::Rc;

use crate::{MultiValue, RuntimeResult, Value};

/// Anything a script can call.
///
/// Compiled closures live in the evaluator; host functions are wrapped in
/// `NativeFunction`. Both are stored as `Value::Function(Rc<dyn Callable>)`
/// and compared by pointer identity.
pub trait Callable {
    fn call(&self, args: MultiValue) -> RuntimeResult<MultiValue>;

    /// Name used when the function is displayed.
    fn name(&self) -> &str;
}

/// Boxed host function body.
pub type NativeFn = dyn Fn(MultiValue) -> RuntimeResult<MultiValue>;

/// A host function exposed to scripts.
pub struct NativeFunction {
    name: String,
    func: Box<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(MultiValue) -> RuntimeResult<MultiValue> + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            func: Box::new(func),
        }
    }

    /// Wrap into a script value.
    pub fn into_value(self) -> Value {
        Value::Function(Rc::new(self))
    }
}

impl Callable for NativeFunction {
    fn call(&self, args: MultiValue) -> RuntimeResult<MultiValue> {
        (self.func)(args)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native {}>", self.name)
    }
}

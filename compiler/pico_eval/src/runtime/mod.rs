//! The runtime: owner of the global table and entry point for hosts.
//!
//! - `define` installs host bindings into the global table
//! - `evaluate` parses, compiles and runs a chunk in the global scope
//! - `execute` calls a global function by name, reporting `Absent` when the
//!   name does not hold a function

mod config;

pub use config::{RuntimeBuilder, RuntimeConfig};

use std::rc::Rc;

use pico_value::{Callable, MultiValue, RuntimeResult, Table, TableRef, Value};

use crate::compiler::Compiler;
use crate::exec::{Closure, Context};
use crate::Error;

/// Result of `Runtime::execute`.
#[derive(Clone, Debug, PartialEq)]
pub enum Execution {
    /// The global is not a function.
    Absent,
    /// The function ran and returned these values (possibly none).
    Returned(MultiValue),
}

impl Execution {
    pub fn is_absent(&self) -> bool {
        matches!(self, Execution::Absent)
    }

    /// First returned value; nil when absent or nothing was returned.
    pub fn first(&self) -> Value {
        match self {
            Execution::Absent => Value::Nil,
            Execution::Returned(values) => values.first(),
        }
    }
}

/// A script runtime with its own global namespace.
///
/// Single-threaded: values are `Rc`-based and the runtime is neither `Send`
/// nor `Sync`.
pub struct Runtime {
    ctx: Rc<Context>,
    config: RuntimeConfig,
}

impl Runtime {
    pub fn new() -> Self {
        Runtime::with_config(RuntimeConfig::default())
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Runtime {
            ctx: Rc::new(Context::new(Table::new_ref(), config.max_call_depth)),
            config,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Merge bindings into the global table. Later bindings overwrite
    /// earlier ones with the same name; a nil value removes the name.
    pub fn define<I, K>(&self, bindings: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut globals = self.ctx.globals.borrow_mut();
        for (name, value) in bindings {
            globals.set_str(name.as_ref(), value);
        }
    }

    /// Define a single host function.
    pub fn define_fn(
        &self,
        name: &str,
        func: impl Fn(MultiValue) -> RuntimeResult<MultiValue> + 'static,
    ) {
        self.define([(name, Value::native(name, func))]);
    }

    /// Parse and compile without running.
    pub fn check(&self, source: &str) -> Result<(), Error> {
        let block = pico_parse::parse(source)?;
        Compiler::new().compile_chunk(&block)?;
        Ok(())
    }

    /// Parse, compile and run a chunk in the global scope.
    ///
    /// Returns whatever the chunk's top-level `return` produced. Errors are
    /// not caught: state mutated before a runtime error stays mutated.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn evaluate(&self, source: &str) -> Result<MultiValue, Error> {
        let block = pico_parse::parse(source)?;
        let proto = Compiler::new().compile_chunk(&block)?;
        let chunk = Closure::new(proto, Rc::from(Vec::new()), Rc::clone(&self.ctx));
        Ok(chunk.call(MultiValue::new())?)
    }

    /// Call the global function `name`.
    #[tracing::instrument(level = "debug", skip(self, args))]
    pub fn execute(&self, name: &str, args: impl Into<MultiValue>) -> RuntimeResult<Execution> {
        let callee = self.global(name);
        match callee {
            Value::Function(function) => Ok(Execution::Returned(function.call(args.into())?)),
            _ => {
                tracing::trace!(name, "no such function");
                Ok(Execution::Absent)
            }
        }
    }

    /// Shared handle to the global table.
    pub fn globals(&self) -> &TableRef {
        &self.ctx.globals
    }

    pub fn global(&self, name: &str) -> Value {
        self.ctx.globals.borrow().get_str(name)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::new()
    }
}

impl Drop for Runtime {
    /// Script closures hold the context, which holds the globals, which
    /// hold the closures. Emptying the table breaks that cycle.
    fn drop(&mut self) {
        let old = match self.ctx.globals.try_borrow_mut() {
            Ok(mut globals) => std::mem::take(&mut *globals),
            Err(_) => return,
        };
        drop(old);
    }
}

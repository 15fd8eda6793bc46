//! Pico Eval - operators, compiler and runtime for pico scripts.
//!
//! # Architecture
//!
//! - `evaluate_binary` / `evaluate_unary`: operator library over `Value`
//! - `Compiler`: turns the syntax tree into nested closures, resolving every
//!   name to a local slot, an upvalue or a global at compile time
//! - `Runtime`: owns the global table; `define`, `evaluate`, `execute`
//!
//! Value types are re-exported from `pico_value` for convenience.

mod compiler;
mod errors;
mod exec;
mod operators;
mod runtime;
mod unary_operators;

pub use errors::{CompileError, Error};
pub use operators::evaluate_binary;
pub use runtime::{Execution, Runtime, RuntimeBuilder, RuntimeConfig};
pub use unary_operators::evaluate_unary;

pub use pico_value::{
    library, to_bool, to_number, to_string, type_error, type_of, Callable, HostSignal,
    MultiValue, NativeFunction, RuntimeError, RuntimeResult, Table, TableRef, TypeTag, Value,
};

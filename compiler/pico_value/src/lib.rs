//! Runtime value model for pico scripts.
//!
//! - `Value`: nil, boolean, number, string, table, function
//! - `Table`: hybrid array/map with a maintained contiguous length
//! - `MultiValue`: the result of every call
//! - Coercions (`to_bool`, `to_number`, `to_string`, `type_of`)
//! - `RuntimeError`, the error type every operator and host function returns

mod callable;
mod coerce;
mod errors;
mod multi;
mod table;
mod value;

pub use callable::{Callable, NativeFn, NativeFunction};
pub use coerce::{to_bool, to_number, to_string, type_of, TypeTag};
pub use errors::{
    coercion, comparison, library, stack_overflow, type_error, HostSignal, RuntimeError,
    RuntimeResult,
};
pub use multi::MultiValue;
pub use table::{Table, TableKey, TableRef};
pub use value::Value;

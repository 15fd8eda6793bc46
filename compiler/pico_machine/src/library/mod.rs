//! Language-level host library installed into every machine runtime.
//!
//! Functions follow the console's conventions: numeric arguments coerce
//! leniently (missing or non-numeric values count as zero) and misuse
//! raises `RuntimeError::Library` tagged with the function name.

mod math;
mod string;
mod system;
mod table;

use std::cell::RefCell;
use std::rc::Rc;

use pico_eval::{library, to_number, MultiValue, Runtime, RuntimeResult, TableRef, Value};

use crate::print_handler::SharedPrintHandler;
use crate::prng::Prng;

/// Machine state reachable from library functions.
#[derive(Clone)]
pub struct Host {
    pub prng: Rc<RefCell<Prng>>,
    pub printer: SharedPrintHandler,
}

impl Host {
    pub fn new(seed: u32, printer: SharedPrintHandler) -> Self {
        Host {
            prng: Rc::new(RefCell::new(Prng::new(seed))),
            printer,
        }
    }
}

type Binding = (&'static str, Value);

/// Define every library function in `runtime`'s globals.
pub fn install(runtime: &Runtime, host: &Host) {
    let mut bindings = Vec::new();
    bindings.extend(table::bindings());
    bindings.extend(math::bindings(host));
    bindings.extend(string::bindings());
    bindings.extend(system::bindings(host));
    tracing::debug!(count = bindings.len(), "installing host library");
    runtime.define(bindings);
}

fn binding(
    name: &'static str,
    func: impl Fn(MultiValue) -> RuntimeResult<MultiValue> + 'static,
) -> Binding {
    (name, Value::native(name, func))
}

/// Lenient numeric argument.
fn number(args: &MultiValue, index: usize) -> f64 {
    to_number(&args.pluck(index), false).unwrap_or_default()
}

fn table_arg(function: &str, args: &MultiValue, index: usize) -> RuntimeResult<TableRef> {
    match args.pluck(index) {
        Value::Table(t) => Ok(t),
        other => Err(library(
            function,
            format!("argument {} was not a table (got {})", index + 1, other.type_tag()),
        )),
    }
}

fn single(value: impl Into<Value>) -> RuntimeResult<MultiValue> {
    Ok(MultiValue::single(value.into()))
}

fn none() -> RuntimeResult<MultiValue> {
    Ok(MultiValue::new())
}

//! Pico Machine - host library and frame driver for pico scripts.
//!
//! - `Machine`: loads cart source and drives `_init`/`_update`/`_draw`
//! - `library`: the functions scripts see as globals (`add`, `rnd`, `sub`, ...)
//! - `commands`: handlers behind the `pico` binary

pub mod commands;
pub mod library;
mod machine;
pub mod print_handler;
mod prng;

pub use machine::{Machine, MachineConfig, MachineError, Step};
pub use prng::Prng;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Only initializes if `RUST_LOG` is set, e.g. `RUST_LOG=pico_eval=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

//! Command handlers for the `pico` CLI.
//!
//! Each submodule implements one command. Shared helpers for reading
//! sources and reporting errors live here.

use pico_ir::LineIndex;

mod check;
mod debug;
mod run;

pub use check::check_file;
pub use debug::{lex_file, parse_file};
pub use run::{parse_run_options, run_file, RunOptions};

/// Read a source file, exiting with a message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Print a script error as `path:line:col: message` and exit.
pub(crate) fn report_and_exit(path: &str, source: &str, err: &pico_eval::Error) -> ! {
    let index = LineIndex::new(source);
    eprintln!("{path}:{}", err.display_with(&index));
    std::process::exit(1);
}

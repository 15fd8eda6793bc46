//! The `check` command: parse and compile without running.

use pico_eval::Runtime;

use super::{read_file, report_and_exit};

pub fn check_file(path: &str) {
    let content = read_file(path);
    if let Err(err) = Runtime::new().check(&content) {
        report_and_exit(path, &content, &err);
    }
    println!("{path}: ok");
}

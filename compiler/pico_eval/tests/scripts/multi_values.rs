//! Multi-value expansion and truncation.

use crate::common::{eval_ok, eval_one, num, nums, recorded};
use pico_eval::Value;
use pretty_assertions::assert_eq;

const PAIR: &str = "local function pair() return 1, 2 end\n";

fn with_pair(body: &str) -> String {
    format!("{PAIR}{body}")
}

#[test]
fn last_call_expands_into_assignment() {
    assert_eq!(eval_ok(&with_pair("local a, b = pair() return a, b")), nums(&[1.0, 2.0]));
}

#[test]
fn non_last_call_contributes_first_value() {
    assert_eq!(
        eval_ok(&with_pair("local a, b, c = pair(), 10 return a, b, c")),
        vec![num(1.0), num(10.0), Value::Nil]
    );
}

#[test]
fn expansion_after_leading_values() {
    assert_eq!(
        eval_ok(&with_pair("local a, b, c = 0, pair() return a, b, c")),
        nums(&[0.0, 1.0, 2.0])
    );
}

#[test]
fn surplus_values_are_dropped() {
    assert_eq!(eval_ok(&with_pair("local a = pair() return a")), nums(&[1.0]));
}

#[test]
fn parentheses_truncate() {
    assert_eq!(eval_ok(&with_pair("return (pair())")), nums(&[1.0]));
}

#[test]
fn call_arguments_expand() {
    assert_eq!(recorded(&with_pair("record(0, pair())")), nums(&[0.0, 1.0, 2.0]));
    assert_eq!(recorded(&with_pair("record(pair(), 0)")), nums(&[1.0, 0.0]));
}

#[test]
fn return_passes_all_values_through() {
    assert_eq!(
        eval_ok(&with_pair("local function wrap() return pair() end return wrap()")),
        nums(&[1.0, 2.0])
    );
}

#[test]
fn table_constructor_spreads_trailing_call() {
    assert_eq!(eval_one(&with_pair("return #{pair()}")), num(2.0));
    assert_eq!(eval_one(&with_pair("return #{pair(), pair()}")), num(3.0));
}

#[test]
fn swap_evaluates_sources_first() {
    assert_eq!(eval_ok("local a, b = 1, 2 a, b = b, a return a, b"), nums(&[2.0, 1.0]));
}

#[test]
fn binary_operators_use_first_value() {
    assert_eq!(eval_one(&with_pair("return pair() + 10")), num(11.0));
}

//! Table constructors, indexing and `count`.

use crate::common::{eval_err, eval_ok, eval_one, num, nums, runtime, s};
use pico_eval::{Error, RuntimeError, Value};
use pretty_assertions::assert_eq;

#[test]
fn constructor_counts_positional_entries() {
    let (runtime, _) = runtime();
    runtime.evaluate("t = {1, 2, 3}").unwrap();
    assert_eq!(runtime.evaluate("return count(t)").unwrap().first(), num(3.0));
    runtime.evaluate("t[3] = nil").unwrap();
    assert_eq!(runtime.evaluate("return count(t)").unwrap().first(), num(2.0));
}

#[test]
fn local_table_count() {
    assert_eq!(eval_one("local t = {1, 2, 3} return count(t)"), num(3.0));
    assert_eq!(eval_one("local t = {1, 2, 3} t[3] = nil return count(t)"), num(2.0));
}

#[test]
fn deleting_below_top_keeps_count() {
    assert_eq!(eval_one("local t = {1, 2, 3} t[2] = nil return #t"), num(3.0));
}

#[test]
fn ascending_inserts_extend_count() {
    let source = "
        local t = {}
        for i = 1, 10 do t[i] = i * i end
        return #t, t[4], t[10]
    ";
    assert_eq!(eval_ok(source), nums(&[10.0, 16.0, 100.0]));
}

#[test]
fn filling_a_gap_joins_the_runs() {
    let source = "
        local t = {}
        t[1] = 'a' t[3] = 'c'
        local before = #t
        t[2] = 'b'
        return before, #t
    ";
    assert_eq!(eval_ok(source), nums(&[1.0, 3.0]));
}

#[test]
fn named_and_computed_fields() {
    let source = "
        local key = 'dyn'
        local t = {x = 1, ['y'] = 2, [key] = 3, 'first'}
        return t.x, t.y, t.dyn, t[1]
    ";
    assert_eq!(eval_ok(source), vec![num(1.0), num(2.0), num(3.0), s("first")]);
}

#[test]
fn missing_keys_read_nil() {
    assert_eq!(eval_one("local t = {} return t.nothing"), Value::Nil);
    assert_eq!(eval_one("local t = {} return t[42]"), Value::Nil);
}

#[test]
fn integral_float_and_integer_keys_match() {
    assert_eq!(eval_one("local t = {} t[2] = 'two' return t[4 / 2]"), s("two"));
}

#[test]
fn tables_are_shared_by_reference() {
    let source = "
        local a = {}
        local b = a
        b.value = 7
        return a.value, a == b, {} == {}
    ";
    assert_eq!(eval_ok(source), vec![num(7.0), Value::Bool(true), Value::Bool(false)]);
}

#[test]
fn nested_tables() {
    let source = "
        local grid = {{1, 2}, {3, 4}}
        grid[2][1] = 30
        return grid[1][2], grid[2][1], #grid
    ";
    assert_eq!(eval_ok(source), nums(&[2.0, 30.0, 2.0]));
}

#[test]
fn nil_key_assignment_fails() {
    assert_eq!(
        eval_err("local t = {} t[nil] = 1"),
        Error::Runtime(RuntimeError::Type("table index is nil".to_string()))
    );
}

#[test]
fn indexing_non_table_fails() {
    let err = eval_err("local n = 5 return n.x");
    assert_eq!(
        err,
        Error::Runtime(RuntimeError::Type(
            "attempt to index a number value (local 'n')".to_string()
        ))
    );
}

#[test]
fn length_of_string() {
    assert_eq!(eval_one("return #'hello'"), num(5.0));
}

#[test]
fn long_linked_chain_is_released() {
    let source = "local l = nil for i = 1, 300000 do l = {next = l} end return 1";
    assert_eq!(eval_one(source), num(1.0));
}

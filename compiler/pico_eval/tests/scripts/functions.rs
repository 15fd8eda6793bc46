//! Functions, closures and upvalues.

use crate::common::{eval_ok, eval_one, num, nums, recorded, runtime, s};
use pico_eval::{Execution, MultiValue, Value};
use pretty_assertions::assert_eq;

#[test]
fn execute_global_function() {
    let (runtime, _) = runtime();
    runtime.evaluate("function f(a, b) return a + b end").unwrap();
    let result = runtime.execute("f", vec![num(2.0), num(3.0)]).unwrap();
    assert_eq!(result, Execution::Returned(MultiValue::single(num(5.0))));
}

#[test]
fn missing_arguments_are_nil() {
    assert_eq!(eval_one("local function f(a, b) return b end return f(1)"), Value::Nil);
}

#[test]
fn extra_arguments_are_dropped() {
    assert_eq!(eval_one("local function f(a) return a end return f(1, 2, 3)"), num(1.0));
}

#[test]
fn recursion() {
    let source = "
        local function fib(n)
            if n < 2 then return n end
            return fib(n - 1) + fib(n - 2)
        end
        return fib(15)
    ";
    assert_eq!(eval_one(source), num(610.0));
}

#[test]
fn mutual_recursion_through_globals() {
    let source = "
        function is_even(n) if n == 0 then return true end return is_odd(n - 1) end
        function is_odd(n) if n == 0 then return false end return is_even(n - 1) end
        return is_even(10), is_odd(7)
    ";
    assert_eq!(eval_ok(source), vec![Value::Bool(true), Value::Bool(true)]);
}

mod closures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counter_keeps_private_state() {
        let source = "
            local function counter()
                local n = 0
                return function() n = n + 1 return n end
            end
            local a, b = counter(), counter()
            a() a()
            return a(), b()
        ";
        assert_eq!(eval_ok(source), nums(&[3.0, 1.0]));
    }

    #[test]
    fn captures_by_reference() {
        let source = "
            local x = 1
            local function get() return x end
            x = 2
            return get()
        ";
        assert_eq!(eval_one(source), num(2.0));
    }

    #[test]
    fn inner_writes_are_visible_outside() {
        let source = "
            local x = 1
            local function bump() x = x + 10 end
            bump()
            return x
        ";
        assert_eq!(eval_one(source), num(11.0));
    }

    #[test]
    fn each_iteration_gets_a_fresh_variable() {
        let source = "
            local fns = {}
            for i = 1, 3 do fns[i] = function() return i end end
            record(fns[1](), fns[2](), fns[3]())
        ";
        assert_eq!(recorded(source), nums(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn local_redeclared_in_loop_is_fresh() {
        let source = "
            local fns = {}
            local k = 1
            while k <= 2 do
                local captured = k * 100
                fns[k] = function() return captured end
                k = k + 1
            end
            return fns[1](), fns[2]()
        ";
        assert_eq!(eval_ok(source), nums(&[100.0, 200.0]));
    }

    #[test]
    fn deeply_nested_upvalue() {
        let source = "
            local base = 5
            local function outer()
                return function()
                    return function() return base * 2 end
                end
            end
            return outer()()()
        ";
        assert_eq!(eval_one(source), num(10.0));
    }

    #[test]
    fn assignment_without_local_targets_global() {
        let (runtime, _) = runtime();
        runtime.evaluate("local function set() created = 'yes' end set()").unwrap();
        assert_eq!(runtime.global("created"), s("yes"));
    }
}

mod varargs {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rest_argument_is_a_table() {
        let source = "
            local function pack(first, ...)
                local rest = ...
                return first, #rest, rest[1], rest[2]
            end
            return pack('a', 'b', 'c')
        ";
        assert_eq!(eval_ok(source), vec![s("a"), num(2.0), s("b"), s("c")]);
    }

    #[test]
    fn empty_rest() {
        assert_eq!(eval_one("local function f(...) local r = ... return #r end return f()"), num(0.0));
    }
}

mod methods {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn colon_definition_and_call() {
        let source = "
            local account = {balance = 10}
            function account:deposit(n) self.balance = self.balance + n return self.balance end
            account:deposit(5)
            return account:deposit(1), account.balance
        ";
        assert_eq!(eval_ok(source), nums(&[16.0, 16.0]));
    }

    #[test]
    fn dotted_function_names() {
        let source = "
            local lib = {util = {}}
            function lib.util.twice(x) return x * 2 end
            return lib.util.twice(21)
        ";
        assert_eq!(eval_one(source), num(42.0));
    }

    #[test]
    fn receiver_evaluated_once() {
        let source = "
            local obj = {n = 0}
            function obj:get() return self end
            local function fetch() record('fetch') return obj end
            fetch():get()
        ";
        assert_eq!(recorded(source), vec![s("fetch")]);
    }
}

#[test]
fn functions_are_values() {
    let source = "
        local function apply(f, x) return f(x) end
        local double = function(v) return v * 2 end
        return apply(function(v) return v + 1 end, 1), apply(double, 4)
    ";
    assert_eq!(eval_ok(source), nums(&[2.0, 8.0]));
}

#[test]
fn string_and_table_call_sugar() {
    let source = "
        local function id(x) return x end
        local t = id{1, 2}
        return id'text', #t
    ";
    assert_eq!(eval_ok(source), vec![s("text"), num(2.0)]);
}

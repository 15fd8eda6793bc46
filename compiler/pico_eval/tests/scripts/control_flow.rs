//! Loops, conditionals, `break` and `return`.

use crate::common::{eval, eval_ok, eval_one, num, nums, recorded, s};
use pico_eval::{Error, RuntimeError, Value};

mod numeric_for {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_in_order() {
        assert_eq!(recorded("for i = 1, 3 do record(i) end"), nums(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn explicit_step() {
        assert_eq!(recorded("for i = 0, 10, 5 do record(i) end"), nums(&[0.0, 5.0, 10.0]));
        assert_eq!(recorded("for i = 3, 1, -1 do record(i) end"), nums(&[3.0, 2.0, 1.0]));
        assert_eq!(recorded("for i = 0, 1, 0.5 do record(i) end"), nums(&[0.0, 0.5, 1.0]));
    }

    #[test]
    fn empty_range_runs_nothing() {
        assert_eq!(recorded("for i = 5, 1 do record(i) end"), Vec::<Value>::new());
    }

    #[test]
    fn string_bounds_coerce_once() {
        assert_eq!(recorded("for i = '1', 3 do record(i) end"), nums(&[1.0, 2.0, 3.0]));
        assert_eq!(recorded("for i = 1, '2' do record(i) end"), nums(&[1.0, 2.0]));
        assert_eq!(recorded("for i = 1, 5, '2' do record(i) end"), nums(&[1.0, 3.0, 5.0]));
    }

    #[test]
    fn non_numeric_bound_is_a_coercion_error() {
        assert!(matches!(
            eval("for i = 1, 'x' do end"),
            Err(Error::Runtime(RuntimeError::Coercion { .. }))
        ));
        assert!(matches!(
            eval("for i = 1, 3, {} do end"),
            Err(Error::Runtime(RuntimeError::Coercion { .. }))
        ));
    }

    #[test]
    fn bounds_evaluated_once() {
        let source = "
            local n = 3
            for i = 1, n do n = 10 record(i) end
        ";
        assert_eq!(recorded(source), nums(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn loop_variable_is_local() {
        assert_eq!(eval_one("i = 'outer' for i = 1, 2 do end return i"), s("outer"));
    }

    #[test]
    fn break_exits_innermost_loop() {
        let source = "
            for i = 1, 3 do
                for j = 1, 3 do
                    if j > i then break end
                    record(i * 10 + j)
                end
            end
        ";
        assert_eq!(recorded(source), nums(&[11.0, 21.0, 22.0, 31.0, 32.0, 33.0]));
    }
}

mod generic_for {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stateless_iterator() {
        let source = "
            local function iter(t, i)
                i = i + 1
                local v = t[i]
                if v then return i, v end
            end
            local list = {'a', 'b', 'c'}
            for i, v in iter, list, 0 do record(i, v) end
        ";
        assert_eq!(
            recorded(source),
            vec![num(1.0), s("a"), num(2.0), s("b"), num(3.0), s("c")]
        );
    }

    #[test]
    fn closure_iterator() {
        let source = "
            local function range(n)
                local i = 0
                return function()
                    i = i + 1
                    if i <= n then return i end
                end
            end
            for x in range(3) do record(x) end
        ";
        assert_eq!(recorded(source), nums(&[1.0, 2.0, 3.0]));
    }
}

mod while_and_repeat {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn while_loop() {
        assert_eq!(
            eval_one("local n, total = 0, 0 while n < 5 do n = n + 1 total = total + n end return total"),
            num(15.0)
        );
    }

    #[test]
    fn repeat_condition_sees_body_locals() {
        let source = "
            local n = 0
            repeat
                n = n + 1
                local done = n >= 3
            until done
            return n
        ";
        assert_eq!(eval_one(source), num(3.0));
    }

    #[test]
    fn repeat_runs_at_least_once() {
        assert_eq!(recorded("repeat record('once') until true"), vec![s("once")]);
    }

    #[test]
    fn break_from_while() {
        assert_eq!(
            eval_one("local n = 0 while true do n = n + 1 if n == 4 then break end end return n"),
            num(4.0)
        );
    }
}

mod conditionals {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn elseif_chain() {
        let source = "
            local function grade(n)
                if n > 90 then return 'a'
                elseif n > 80 then return 'b'
                elseif n > 70 then return 'c'
                else return 'f' end
            end
            return grade(95), grade(85), grade(75), grade(10)
        ";
        assert_eq!(eval_ok(source), vec![s("a"), s("b"), s("c"), s("f")]);
    }

    #[test]
    fn block_scopes_locals() {
        assert_eq!(eval_one("local x = 1 do local x = 2 end return x"), num(1.0));
    }
}

mod returns {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn return_from_inside_loop() {
        let source = "
            local function find(t, want)
                for i = 1, #t do
                    if t[i] == want then return i end
                end
                return nil
            end
            return find({5, 6, 7}, 6), find({5}, 9)
        ";
        assert_eq!(eval_ok(source), vec![num(2.0), Value::Nil]);
    }

    #[test]
    fn chunk_return_values() {
        assert_eq!(eval_ok("return 1, 'two', nil"), vec![num(1.0), s("two"), Value::Nil]);
        assert!(eval_ok("x = 1").is_empty());
    }
}

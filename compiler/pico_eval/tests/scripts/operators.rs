//! Operator semantics as seen from scripts.

use crate::common::{eval, eval_err, eval_ok, eval_one, num, nums, recorded, s};
use pico_eval::{Error, RuntimeError, TypeTag, Value};

mod truthiness {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_nil_and_false_are_falsy() {
        let source = "
            local function truthy(v) if v then return 1 else return 0 end end
            return truthy(0), truthy(''), truthy(nil), truthy(false), truthy({})
        ";
        assert_eq!(eval_ok(source), nums(&[1.0, 1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn not_operator() {
        assert_eq!(
            eval_ok("return not nil, not 0, not false"),
            vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)]
        );
    }
}

mod comparison {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_compare() {
        assert_eq!(eval_one("return 1 < 2"), Value::Bool(true));
        assert_eq!(eval_one("return 2 <= 1"), Value::Bool(false));
    }

    #[test]
    fn strings_compare_lexicographically() {
        assert_eq!(eval_one("return 'abc' < 'abd'"), Value::Bool(true));
    }

    #[test]
    fn mixed_types_fail() {
        assert_eq!(
            eval_err("return 1 < 'a'"),
            Error::Runtime(RuntimeError::Comparison {
                op: "<",
                left: TypeTag::Number,
                right: TypeTag::String,
            })
        );
    }

    #[test]
    fn equality_across_types_is_false() {
        assert_eq!(eval_one("return 1 == '1'"), Value::Bool(false));
        assert_eq!(eval_one("return 1 ~= '1'"), Value::Bool(true));
        assert_eq!(eval_one("return nil == false"), Value::Bool(false));
    }
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn precedence() {
        assert_eq!(eval_one("return 1 + 2 * 3"), num(7.0));
        assert_eq!(eval_one("return (1 + 2) * 3"), num(9.0));
        assert_eq!(eval_one("return 2 ^ 3 ^ 2"), num(512.0));
        assert_eq!(eval_one("return -2 ^ 2"), num(-4.0));
    }

    #[test]
    fn digit_strings_coerce() {
        assert_eq!(eval_one("return '10' + 5"), num(15.0));
    }

    #[test]
    fn only_unsigned_integer_strings_coerce() {
        assert_eq!(
            eval_err("return '1.5' + 1"),
            Error::Runtime(RuntimeError::Coercion {
                found: TypeTag::String,
                expected: "number",
            })
        );
        assert!(eval("return '-3' * 2").is_err());
    }

    #[test]
    fn negation_is_lenient() {
        assert_eq!(eval_one("return -'7'"), num(-7.0));
        assert_eq!(eval_one("return -'x' == 0"), Value::Bool(true));
    }

    #[test]
    fn remainder_and_division() {
        assert_eq!(eval_ok("return 7 % 3, 7 / 2"), nums(&[1.0, 3.5]));
    }

    #[test]
    fn nil_arithmetic_fails() {
        assert!(matches!(
            eval_err("return nil + 1"),
            Error::Runtime(RuntimeError::Coercion { found: TypeTag::Nil, .. })
        ));
    }
}

mod concat {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_and_booleans_stringify() {
        assert_eq!(eval_one("return 'x' .. 1 .. true"), s("x1true"));
        assert_eq!(eval_one("return 1.5 .. ''"), s("1.5"));
    }

    #[test]
    fn tables_do_not_concat() {
        assert!(matches!(
            eval_err("return 'a' .. {}"),
            Error::Runtime(RuntimeError::Coercion { found: TypeTag::Table, .. })
        ));
    }
}

mod short_circuit {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn or_skips_right_side() {
        let log = recorded("result = 'a' or record('evaluated') record(result)");
        assert_eq!(log, vec![s("a")]);
    }

    #[test]
    fn and_skips_right_side() {
        let log = recorded("result = false and record('evaluated') record(result)");
        assert_eq!(log, vec![Value::Bool(false)]);
    }

    #[test]
    fn or_never_evaluates_failing_right_side() {
        assert_eq!(eval_one("return 'a' or (nil + 1)"), s("a"));
        assert_eq!(eval_one("return nil or 'b'"), s("b"));
        assert_eq!(eval_one("return 1 and 2"), num(2.0));
    }
}

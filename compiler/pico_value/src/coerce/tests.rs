use super::*;
use crate::RuntimeError;

#[test]
fn truthiness() {
    assert!(to_bool(&Value::Number(0.0)));
    assert!(to_bool(&Value::string("")));
    assert!(!to_bool(&Value::Nil));
    assert!(!to_bool(&Value::Bool(false)));
    assert!(to_bool(&Value::new_table()));
}

#[test]
fn type_tags() {
    assert_eq!(type_of(&Value::Nil).as_str(), "nil");
    assert_eq!(type_of(&Value::Bool(true)).as_str(), "boolean");
    assert_eq!(type_of(&Value::new_table()).as_str(), "table");
    let f = Value::native("f", |_| Ok(crate::MultiValue::new()));
    assert_eq!(type_of(&f), TypeTag::Function);
}

#[test]
fn numeric_strings() {
    assert_eq!(to_number(&Value::string("42"), true), Ok(42.0));
    assert_eq!(to_number(&Value::string("007"), true), Ok(7.0));
}

// Only unsigned integer strings convert; signed and fractional ones are
// rejected like any other non-numeric string.
#[test]
fn signed_and_fractional_strings_are_not_numbers() {
    assert_eq!(
        to_number(&Value::string("-1"), true),
        Err(RuntimeError::Coercion {
            found: TypeTag::String,
            expected: "number"
        })
    );
    assert!(to_number(&Value::string("1.5"), true).is_err());
    assert_eq!(to_number(&Value::string("1.5"), false), Ok(0.0));
}

#[test]
fn non_strict_defaults_to_zero() {
    assert_eq!(to_number(&Value::Nil, false), Ok(0.0));
    assert_eq!(to_number(&Value::string(""), false), Ok(0.0));
    assert!(to_number(&Value::Nil, true).is_err());
}

#[test]
fn string_coercion() {
    assert_eq!(to_string(&Value::Number(10.0)).as_deref(), Ok("10"));
    assert_eq!(to_string(&Value::Bool(false)).as_deref(), Ok("false"));
    assert_eq!(to_string(&Value::string("x")).as_deref(), Ok("x"));
    assert!(to_string(&Value::Nil).is_err());
    assert!(to_string(&Value::new_table()).is_err());
}

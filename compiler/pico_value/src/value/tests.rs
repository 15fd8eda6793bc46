use super::*;

#[test]
fn numbers_print_integrally() {
    assert_eq!(Value::Number(3.0).to_string(), "3");
    assert_eq!(Value::Number(-2.0).to_string(), "-2");
    assert_eq!(Value::Number(0.5).to_string(), "0.5");
    assert_eq!(Value::Number(f64::NAN).to_string(), "nan");
}

#[test]
fn display_of_reference_values() {
    let table = Value::new_table();
    assert!(table.to_string().starts_with("table: "));
    let f = Value::native("printh", |_| Ok(MultiValue::new()));
    assert_eq!(f.to_string(), "function: printh");
}

#[test]
fn cross_type_values_are_unequal() {
    assert_ne!(Value::Number(1.0), Value::string("1"));
    assert_ne!(Value::Nil, Value::Bool(false));
}

#[test]
fn tables_compare_by_identity() {
    let a = Value::new_table();
    let b = Value::new_table();
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}

#[test]
fn functions_compare_by_identity() {
    let f = Value::native("f", |_| Ok(MultiValue::new()));
    let g = Value::native("f", |_| Ok(MultiValue::new()));
    assert_eq!(f, f.clone());
    assert_ne!(f, g);
}

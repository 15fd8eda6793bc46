use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn set(table: &mut Table, key: Value, value: Value) {
    if let Err(err) = table.set(&key, value) {
        panic!("set failed: {err}");
    }
}

#[test]
fn absent_key_reads_nil() {
    let table = Table::new();
    assert!(table.get(&Value::string("missing")).is_nil());
    assert!(table.get(&Value::Nil).is_nil());
}

#[test]
fn sequence_construction() {
    let table = Table::from_sequence([num(10.0), num(20.0), num(30.0)]);
    assert_eq!(table.count(), 3);
    assert_eq!(table.get(&num(2.0)), num(20.0));
}

#[test]
fn deleting_top_decrements_count() {
    let mut table = Table::from_sequence([num(1.0), num(2.0), num(3.0)]);
    set(&mut table, num(3.0), Value::Nil);
    assert_eq!(table.count(), 2);
    assert_eq!(table.len_all(), 2);
}

#[test]
fn deleting_below_top_keeps_count() {
    let mut table = Table::from_sequence([num(1.0), num(2.0), num(3.0)]);
    set(&mut table, num(2.0), Value::Nil);
    assert_eq!(table.count(), 3);
    assert!(table.get(&num(2.0)).is_nil());
}

#[test]
fn filling_a_gap_advances_past_later_keys() {
    let mut table = Table::new();
    set(&mut table, num(1.0), Value::Bool(true));
    set(&mut table, num(3.0), Value::Bool(true));
    assert_eq!(table.count(), 1);
    set(&mut table, num(2.0), Value::Bool(true));
    assert_eq!(table.count(), 3);
}

#[test]
fn non_integer_keys_do_not_count() {
    let mut table = Table::new();
    set(&mut table, num(1.5), Value::Bool(true));
    set(&mut table, Value::string("1"), Value::Bool(true));
    set(&mut table, num(0.0), Value::Bool(true));
    assert_eq!(table.count(), 0);
    assert_eq!(table.len_all(), 3);
}

#[test]
fn negative_zero_is_zero() {
    let mut table = Table::new();
    set(&mut table, num(-0.0), Value::string("z"));
    assert_eq!(table.get(&num(0.0)), Value::string("z"));
}

#[test]
fn nil_and_nan_keys_are_rejected() {
    let mut table = Table::new();
    assert!(table.set(&Value::Nil, num(1.0)).is_err());
    assert!(table.set(&num(f64::NAN), num(1.0)).is_err());
    // Deleting through an invalid key is a no-op.
    assert!(table.set(&Value::Nil, Value::Nil).is_ok());
}

#[test]
fn reference_keys_use_identity() {
    let a = Value::new_table();
    let b = Value::new_table();
    let mut table = Table::new();
    set(&mut table, a.clone(), Value::string("a"));
    assert_eq!(table.get(&a), Value::string("a"));
    assert!(table.get(&b).is_nil());
}

#[test]
fn entries_round_trip_keys() {
    let mut table = Table::new();
    table.set_str("x", num(1.0));
    let entries = table.entries();
    assert_eq!(entries, vec![(Value::string("x"), num(1.0))]);
}

#[test]
fn distinct_ids() {
    assert_ne!(Table::new().id(), Table::new().id());
}

#[test]
fn dropping_a_long_chain_is_iterative() {
    let mut head = Table::new_ref();
    for _ in 0..300_000 {
        let next = Table::new_ref();
        next.borrow_mut().set_str("next", Value::Table(head));
        head = next;
    }
    drop(head);
}

#[test]
fn dropping_keeps_shared_tables_alive() {
    let shared = Table::new_ref();
    shared.borrow_mut().set_str("x", Value::Number(1.0));
    let owner = Table::new_ref();
    owner.borrow_mut().set_str("child", Value::Table(Rc::clone(&shared)));
    owner
        .borrow_mut()
        .insert(TableKey::Table(Rc::clone(&shared)), Value::Bool(true));
    drop(owner);
    assert_eq!(Rc::strong_count(&shared), 1);
    assert_eq!(shared.borrow().get_str("x"), Value::Number(1.0));
}

proptest! {
    #[test]
    fn ascending_fill_counts_every_key(n in 0usize..200) {
        let mut table = Table::new();
        for i in 1..=n {
            table.insert(TableKey::Number(i as f64), Value::Bool(true));
        }
        prop_assert_eq!(table.count(), n);
    }

    #[test]
    fn deleting_top_repeatedly_shrinks_by_one(n in 1usize..100, removals in 0usize..100) {
        let mut table = Table::from_sequence((0..n).map(|i| Value::Number(i as f64)));
        let removals = removals.min(n);
        for _ in 0..removals {
            let before = table.count();
            table.insert(TableKey::Number(before as f64), Value::Nil);
            prop_assert_eq!(table.count(), before - 1);
        }
    }

    #[test]
    fn count_is_a_prefix_of_present_keys(keys in prop::collection::vec(1u8..32, 0..64)) {
        let mut table = Table::new();
        for k in keys {
            table.insert(TableKey::Number(f64::from(k)), Value::Bool(true));
        }
        for i in 1..=table.count() {
            prop_assert!(!table.get(&Value::Number(i as f64)).is_nil());
        }
        prop_assert!(table.get(&Value::Number((table.count() + 1) as f64)).is_nil());
    }
}

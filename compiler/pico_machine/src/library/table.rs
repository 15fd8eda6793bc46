//! Table helpers: `add`, `del`, `count`, `foreach`, `all`, `pairs`.

use std::cell::Cell;

use pico_eval::{MultiValue, Value};

use super::{binding, none, single, table_arg, Binding};

pub(super) fn bindings() -> Vec<Binding> {
    vec![
        binding("add", |args| {
            let table = table_arg("add", &args, 0)?;
            let value = args.pluck(1);
            let mut t = table.borrow_mut();
            let next = t.count() + 1;
            t.set(&Value::Number(next as f64), value.clone())?;
            single(value)
        }),
        binding("del", |args| {
            let table = table_arg("del", &args, 0)?;
            let target = args.pluck(1);
            let mut t = table.borrow_mut();
            let count = t.count();
            let Some(found) = (1..=count).find(|&i| t.get(&index(i)).raw_equals(&target)) else {
                return none();
            };
            let removed = t.get(&index(found));
            // Shift the tail down; the last write stores nil at the old top.
            for i in found..=count {
                let next = t.get(&index(i + 1));
                t.set(&index(i), next)?;
            }
            single(removed)
        }),
        binding("count", |args| {
            let table = table_arg("count", &args, 0)?;
            let t = table.borrow();
            let n = match args.pluck(1) {
                Value::Nil => t.len_all(),
                wanted => t.values().iter().filter(|v| v.raw_equals(&wanted)).count(),
            };
            single(n as f64)
        }),
        binding("foreach", |args| {
            let table = table_arg("foreach", &args, 0)?;
            let func = args.pluck(1);
            let Value::Function(func) = func else {
                return Err(pico_eval::library("foreach", "argument 2 was not a function"));
            };
            let count = table.borrow().count();
            for i in 1..=count {
                // Read each element at call time; the callback may mutate the table.
                let value = table.borrow().get(&index(i));
                if !value.is_nil() {
                    func.call(MultiValue::single(value))?;
                }
            }
            none()
        }),
        binding("all", |args| {
            let table = table_arg("all", &args, 0)?;
            let next = Cell::new(1usize);
            single(Value::native("all iterator", move |_| {
                let i = next.get();
                let t = table.borrow();
                if i > t.count() {
                    return none();
                }
                next.set(i + 1);
                single(t.get(&index(i)))
            }))
        }),
        binding("pairs", |args| {
            let table = table_arg("pairs", &args, 0)?;
            let entries = snapshot(&table.borrow());
            let next = Cell::new(0usize);
            single(Value::native("pairs iterator", move |_| {
                let i = next.get();
                let Some((key, value)) = entries.get(i) else {
                    return none();
                };
                next.set(i + 1);
                Ok(MultiValue::from(vec![key.clone(), value.clone()]))
            }))
        }),
    ]
}

fn index(i: usize) -> Value {
    Value::Number(i as f64)
}

/// Entries with the sequence `1..=count` first, in order, then the rest.
fn snapshot(table: &pico_eval::Table) -> Vec<(Value, Value)> {
    let count = table.count();
    let mut entries: Vec<(Value, Value)> = (1..=count)
        .map(|i| (index(i), table.get(&index(i))))
        .collect();
    entries.extend(table.entries().into_iter().filter(|(key, _)| {
        !matches!(key, Value::Number(n) if n.fract() == 0.0 && *n >= 1.0 && *n <= count as f64)
    }));
    entries
}

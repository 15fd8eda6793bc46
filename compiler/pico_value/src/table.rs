//! The Table container.
//!
//! A hashed map from non-nil keys to non-nil values plus a `top` counter
//! tracking the contiguous run of integer keys starting at 1. `top` is
//! updated incrementally on each integer-key mutation:
//!
//! - deleting the key equal to `top` lowers it to `key - 1`
//! - deleting any other key leaves it alone
//! - inserting probes forward from `top + 1` while keys are present

use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use crate::value::fn_ptr;
use crate::{type_error, Callable, RuntimeResult, Value};

/// Shared handle to a table.
pub type TableRef = Rc<RefCell<Table>>;

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(0);

/// Hashable form of a non-nil, non-NaN value.
///
/// Numbers hash by bit pattern after folding `-0` into `0`; tables and
/// functions by pointer.
#[derive(Clone)]
pub enum TableKey {
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Table(TableRef),
    Function(Rc<dyn Callable>),
}

impl TableKey {
    /// Key for a value, or `None` for nil and NaN.
    pub fn from_value(value: &Value) -> Option<TableKey> {
        Some(match value {
            Value::Nil => return None,
            Value::Number(n) if n.is_nan() => return None,
            Value::Number(n) => TableKey::Number(if *n == 0.0 { 0.0 } else { *n }),
            Value::Bool(b) => TableKey::Bool(*b),
            Value::Str(s) => TableKey::Str(Rc::clone(s)),
            Value::Table(t) => TableKey::Table(Rc::clone(t)),
            Value::Function(f) => TableKey::Function(Rc::clone(f)),
        })
    }

    pub fn to_value(&self) -> Value {
        match self {
            TableKey::Bool(b) => Value::Bool(*b),
            TableKey::Number(n) => Value::Number(*n),
            TableKey::Str(s) => Value::Str(Rc::clone(s)),
            TableKey::Table(t) => Value::Table(Rc::clone(t)),
            TableKey::Function(f) => Value::Function(Rc::clone(f)),
        }
    }

    /// Positive integral index usable for the `top` counter.
    fn as_index(&self) -> Option<usize> {
        match self {
            TableKey::Number(n) if *n >= 1.0 && n.fract() == 0.0 && *n <= usize::MAX as f64 => {
                Some(*n as usize)
            }
            _ => None,
        }
    }
}

impl PartialEq for TableKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TableKey::Bool(a), TableKey::Bool(b)) => a == b,
            (TableKey::Number(a), TableKey::Number(b)) => a.to_bits() == b.to_bits(),
            (TableKey::Str(a), TableKey::Str(b)) => a == b,
            (TableKey::Table(a), TableKey::Table(b)) => Rc::ptr_eq(a, b),
            (TableKey::Function(a), TableKey::Function(b)) => fn_ptr(a) == fn_ptr(b),
            _ => false,
        }
    }
}

impl Eq for TableKey {}

impl Hash for TableKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            TableKey::Bool(b) => b.hash(state),
            TableKey::Number(n) => n.to_bits().hash(state),
            TableKey::Str(s) => s.hash(state),
            TableKey::Table(t) => Rc::as_ptr(t).hash(state),
            TableKey::Function(f) => fn_ptr(f).hash(state),
        }
    }
}

/// Hybrid array/map container.
#[derive(Debug)]
pub struct Table {
    entries: FxHashMap<TableKey, Value>,
    top: usize,
    id: u64,
}

impl Table {
    pub fn new() -> Self {
        Table {
            entries: FxHashMap::default(),
            top: 0,
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn new_ref() -> TableRef {
        Rc::new(RefCell::new(Table::new()))
    }

    /// Build from a positional sequence; keys are `1..=n` in order.
    pub fn from_sequence(values: impl IntoIterator<Item = Value>) -> Self {
        let mut table = Table::new();
        let mut index = 0.0;
        for value in values {
            index += 1.0;
            table.insert(TableKey::Number(index), value);
        }
        table
    }

    /// Opaque identity shown in `table: <id>`.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Absent keys (and nil/NaN) read as nil.
    pub fn get(&self, key: &Value) -> Value {
        TableKey::from_value(key)
            .and_then(|k| self.entries.get(&k).cloned())
            .unwrap_or_default()
    }

    /// Lookup by string key.
    pub fn get_str(&self, key: &str) -> Value {
        self.entries
            .get(&TableKey::Str(Rc::from(key)))
            .cloned()
            .unwrap_or_default()
    }

    /// Store `value` at `key`; a nil value deletes the key.
    ///
    /// Nil and NaN keys are rejected.
    pub fn set(&mut self, key: &Value, value: Value) -> RuntimeResult<()> {
        match TableKey::from_value(key) {
            Some(k) => {
                self.insert(k, value);
                Ok(())
            }
            None if value.is_nil() => Ok(()),
            None if key.is_nil() => Err(type_error("table index is nil")),
            None => Err(type_error("table index is NaN")),
        }
    }

    pub fn set_str(&mut self, key: &str, value: Value) {
        self.insert(TableKey::Str(Rc::from(key)), value);
    }

    /// Core mutation with `top` maintenance.
    pub fn insert(&mut self, key: TableKey, value: Value) {
        let index = key.as_index();
        if value.is_nil() {
            self.entries.remove(&key);
            if index == Some(self.top) {
                self.top -= 1;
            }
        } else {
            self.entries.insert(key, value);
            if index.is_some() {
                self.probe_top();
            }
        }
    }

    fn probe_top(&mut self) {
        while self
            .entries
            .contains_key(&TableKey::Number((self.top + 1) as f64))
        {
            self.top += 1;
        }
    }

    /// Length of the contiguous run `1..=n`.
    pub fn count(&self) -> usize {
        self.top
    }

    /// Number of stored keys of any kind.
    pub fn len_all(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All stored values, in no particular order.
    pub fn values(&self) -> Vec<Value> {
        self.entries.values().cloned().collect()
    }

    /// Snapshot of every key/value pair, in no particular order.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.to_value(), v.clone()))
            .collect()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.top = 0;
    }
}

/// Nested tables are released iteratively so long chains cannot exhaust
/// the native stack.
impl Drop for Table {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        drain_tables(&mut self.entries, &mut pending);
        while let Some(table) = pending.pop() {
            if let Ok(cell) = Rc::try_unwrap(table) {
                drain_tables(&mut cell.into_inner().entries, &mut pending);
            }
        }
    }
}

fn drain_tables(entries: &mut FxHashMap<TableKey, Value>, pending: &mut Vec<TableRef>) {
    for (key, value) in entries.drain() {
        if let TableKey::Table(table) = key {
            pending.push(table);
        }
        if let Value::Table(table) = value {
            pending.push(table);
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Table::new()
    }
}

impl std::fmt::Debug for TableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.to_value())
    }
}

#[cfg(test)]
mod tests;

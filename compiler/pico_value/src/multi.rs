//! Multi-valued call results.

use std::ops::Deref;

use smallvec::SmallVec;

use crate::Value;

/// Ordered values produced by a call or an expression list.
///
/// Lists are kept flat: when an expression list is evaluated every
/// expression but the last contributes its first value and the last one
/// contributes all of its values. Plucking position `k` is then plain
/// indexing, with missing positions reading as nil.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiValue(SmallVec<[Value; 4]>);

impl MultiValue {
    pub fn new() -> Self {
        MultiValue(SmallVec::new())
    }

    /// No values at all (`return` with nothing).
    pub fn empty() -> Self {
        Self::new()
    }

    pub fn single(value: Value) -> Self {
        let mut values = SmallVec::new();
        values.push(value);
        MultiValue(values)
    }

    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    /// Append every value of another result.
    pub fn extend_from(&mut self, other: MultiValue) {
        self.0.extend(other.0);
    }

    /// The k-th value, nil past the end.
    pub fn pluck(&self, k: usize) -> Value {
        self.0.get(k).cloned().unwrap_or(Value::Nil)
    }

    /// Truncate to one value.
    pub fn first(&self) -> Value {
        self.pluck(0)
    }

    /// Take the first value without cloning.
    pub fn into_first(self) -> Value {
        self.0.into_iter().next().unwrap_or(Value::Nil)
    }

    /// Values from position `start` on.
    pub fn rest(&self, start: usize) -> &[Value] {
        self.0.get(start..).unwrap_or(&[])
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0.into_vec()
    }
}

impl Deref for MultiValue {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl From<Value> for MultiValue {
    fn from(value: Value) -> Self {
        MultiValue::single(value)
    }
}

impl From<Vec<Value>> for MultiValue {
    fn from(values: Vec<Value>) -> Self {
        MultiValue(SmallVec::from_vec(values))
    }
}

impl FromIterator<Value> for MultiValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        MultiValue(iter.into_iter().collect())
    }
}

impl IntoIterator for MultiValue {
    type Item = Value;
    type IntoIter = smallvec::IntoIter<[Value; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiValue {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

//! Record structure for relq.
//!
//! This module defines the `Record` struct which represents a single row in a table.

use crate::value::Value;
use alloc::vec::Vec;

/// Position of a record within its owning table's row sequence.
pub type RowPos = usize;

/// A row of a relq table: an ordered, fixed-length sequence of values aligned to the
/// table header. Records are never modified once appended to a table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Record {
    /// Values stored in this record, indexed by attribute position.
    values: Vec<Value>,
}

impl Record {
    /// Creates a new record from its values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Returns a reference to the values.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consumes the record, returning its values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Gets a value at the given attribute position.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns the number of values in this record.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this record has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds a record holding the values at the given positions, in that order.
    pub fn pick(&self, positions: &[usize]) -> Record {
        Record::new(positions.iter().map(|&i| self.values[i].clone()).collect())
    }

    /// Builds a record holding this record's values followed by `other`'s.
    pub fn concat(&self, other: &Record) -> Record {
        let mut values = Vec::with_capacity(self.len() + other.len());
        values.extend(self.values.iter().cloned());
        values.extend(other.values.iter().cloned());
        Record::new(values)
    }

    /// Builds a record holding this record's values followed by `value`.
    pub fn extended(&self, value: Value) -> Record {
        let mut values = Vec::with_capacity(self.len() + 1);
        values.extend(self.values.iter().cloned());
        values.push(value);
        Record::new(values)
    }
}

impl From<Vec<Value>> for Record {
    fn from(values: Vec<Value>) -> Self {
        Record::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_record_new() {
        let record = Record::new(vec![Value::Int(42), Value::from("Alice")]);
        assert_eq!(record.len(), 2);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_record_get_value() {
        let record = Record::new(vec![Value::Int(1), Value::from("Alice")]);
        assert_eq!(record.get(0), Some(&Value::Int(1)));
        assert_eq!(record.get(1), Some(&Value::from("Alice")));
        assert_eq!(record.get(2), None);
    }

    #[test]
    fn test_record_pick() {
        let record = Record::new(vec![Value::Int(1), Value::from("a"), Value::Int(3)]);
        let picked = record.pick(&[2, 0]);
        assert_eq!(picked.values(), &[Value::Int(3), Value::Int(1)]);
    }

    #[test]
    fn test_record_concat_and_extend() {
        let left = Record::new(vec![Value::Int(1)]);
        let right = Record::new(vec![Value::from("x"), Value::Int(2)]);
        let joined = left.concat(&right);
        assert_eq!(joined.len(), 3);
        assert_eq!(joined.get(1), Some(&Value::from("x")));

        let extended = left.extended(Value::Float(0.5));
        assert_eq!(extended.values(), &[Value::Int(1), Value::Float(0.5)]);
    }
}

//! Ordered index implementation for relq.
//!
//! Keys are kept sorted in a `BTreeMap`, so the index needs only `Ord` keys where the
//! hash index needs `Hash`.

use crate::traits::Index;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use relq_core::RowPos;

/// A sorted index answering equality lookups.
#[derive(Clone, Debug)]
pub struct OrderedIndex<K> {
    /// Sorted map from keys to row positions.
    tree: BTreeMap<K, Vec<RowPos>>,
    /// Total number of row positions stored.
    total_rows: usize,
}

impl<K: Ord> Default for OrderedIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> OrderedIndex<K> {
    /// Creates a new ordered index.
    pub fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
            total_rows: 0,
        }
    }
}

impl<K: Ord> Index<K> for OrderedIndex<K> {
    fn add(&mut self, key: K, pos: RowPos) {
        self.tree.entry(key).or_default().push(pos);
        self.total_rows += 1;
    }

    fn get(&self, key: &K) -> &[RowPos] {
        self.tree.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn len(&self) -> usize {
        self.total_rows
    }

    fn key_count(&self) -> usize {
        self.tree.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrderedIndex<i64> {
        let mut index = OrderedIndex::new();
        for (pos, key) in [30, 10, 20, 10, 40].into_iter().enumerate() {
            index.add(key, pos);
        }
        index
    }

    #[test]
    fn test_ordered_point_lookup() {
        let index = sample();
        assert_eq!(index.get(&10), &[1, 3]);
        assert_eq!(index.get(&40), &[4]);
        assert!(index.get(&99).is_empty());
        assert_eq!(index.len(), 5);
        assert_eq!(index.key_count(), 4);
    }

    #[test]
    fn test_ordered_empty() {
        let index: OrderedIndex<i64> = OrderedIndex::default();
        assert!(index.is_empty());
        assert!(index.get(&1).is_empty());
    }
}

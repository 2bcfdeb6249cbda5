//! Hash index implementation for relq.
//!
//! This module provides a hash-based index for O(1) point queries.

use crate::traits::Index;
use alloc::vec::Vec;
use core::hash::Hash;
use hashbrown::HashMap;
use relq_core::RowPos;

/// A hash-based index for O(1) point queries.
///
/// Keys are not ordered, so this index answers equality lookups only.
#[derive(Clone, Debug)]
pub struct HashIndex<K> {
    /// The underlying map from keys to row positions.
    map: HashMap<K, Vec<RowPos>>,
    /// Total number of row positions stored.
    total_rows: usize,
}

impl<K: Eq + Hash> Default for HashIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> HashIndex<K> {
    /// Creates a new hash index.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            total_rows: 0,
        }
    }

    /// Creates a hash index sized for `capacity` distinct keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            total_rows: 0,
        }
    }
}

impl<K: Eq + Hash> Index<K> for HashIndex<K> {
    fn add(&mut self, key: K, pos: RowPos) {
        self.map.entry(key).or_default().push(pos);
        self.total_rows += 1;
    }

    fn get(&self, key: &K) -> &[RowPos] {
        self.map.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn len(&self) -> usize {
        self.total_rows
    }

    fn key_count(&self) -> usize {
        self.map.len()
    }
}

//! Index trait shared by both index kinds.

use relq_core::RowPos;

/// Maps a key to the positions of the rows holding it.
///
/// Positions for one key are kept in the order they were added, which is row order
/// when an index is built by scanning a table front to back.
pub trait Index<K> {
    /// Adds a row position under a key.
    fn add(&mut self, key: K, pos: RowPos);

    /// Gets the row positions stored under a key; empty when the key is absent.
    fn get(&self, key: &K) -> &[RowPos];

    /// Returns the number of row positions in the index.
    fn len(&self) -> usize;

    /// Returns the number of distinct keys in the index.
    fn key_count(&self) -> usize;

    /// Returns true if the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Table storage for relq.
//!
//! This module provides the `Table` struct which holds a header, its rows, and at most
//! one hash index and one ordered index, each bound to a single attribute.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use relq_core::{Error, Header, Record, Result, RowPos, Value};
use relq_index::{HashIndex, Index, OrderedIndex};
use tracing::debug;

/// The two index kinds a table can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    /// Hash index: equality lookups only.
    Hash,
    /// Ordered index: equality and range lookups.
    Ordered,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Hash => write!(f, "hash"),
            IndexKind::Ordered => write!(f, "ordered"),
        }
    }
}

/// An index bound to one attribute of its owning table.
#[derive(Clone, Debug)]
pub struct AttributeIndex<I> {
    attribute: String,
    position: usize,
    index: I,
}

impl<I> AttributeIndex<I> {
    /// Returns the indexed attribute name.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns the indexed attribute's position in the header.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the underlying index.
    pub fn index(&self) -> &I {
        &self.index
    }
}

impl<I: Index<Value>> AttributeIndex<I> {
    /// Scans all rows once, grouping row positions by the attribute's value.
    fn build(attribute: &str, position: usize, rows: &[Record], mut index: I) -> Self {
        for (pos, record) in rows.iter().enumerate() {
            index.add(record.values()[position].to_index_key(), pos);
        }
        Self {
            attribute: attribute.to_string(),
            position,
            index,
        }
    }

    fn lookup(&self, key: &Value) -> &[RowPos] {
        self.index.get(&key.to_index_key())
    }
}

/// An in-memory table.
///
/// Every row has exactly `header.len()` values. Rows never change after the table is
/// built; only index attachment mutates a table, and building an index of one kind
/// replaces the previous index of that kind.
#[derive(Clone, Debug, Default)]
pub struct Table {
    header: Header,
    rows: Vec<Record>,
    hash_index: Option<AttributeIndex<HashIndex<Value>>>,
    ordered_index: Option<AttributeIndex<OrderedIndex<Value>>>,
}

impl Table {
    /// Creates an empty table with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            rows: Vec::new(),
            hash_index: None,
            ordered_index: None,
        }
    }

    /// Creates a table from a header and rows, checking every row's width.
    pub fn with_rows(header: Header, rows: Vec<Record>) -> Result<Self> {
        if let Some((line, record)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != header.len())
        {
            return Err(Error::malformed_record(line + 1, header.len(), record.len()));
        }
        Ok(Self {
            header,
            rows,
            hash_index: None,
            ordered_index: None,
        })
    }

    /// Returns the header.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the rows in table order.
    #[inline]
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Returns the row at a position.
    pub fn row(&self, pos: RowPos) -> Option<&Record> {
        self.rows.get(pos)
    }

    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of an attribute in the header.
    pub fn attribute_position(&self, name: &str) -> Result<usize> {
        self.header.position(name)
    }

    /// Builds a hash index on `attribute`, replacing any previous hash index.
    pub fn build_hash_index(&mut self, attribute: &str) -> Result<()> {
        let position = self.attribute_position(attribute)?;
        let index = AttributeIndex::build(
            attribute,
            position,
            &self.rows,
            HashIndex::with_capacity(self.rows.len()),
        );
        debug!(
            attribute,
            rows = self.rows.len(),
            keys = index.index().key_count(),
            "built hash index"
        );
        self.hash_index = Some(index);
        Ok(())
    }

    /// Builds an ordered index on `attribute`, replacing any previous ordered index.
    pub fn build_ordered_index(&mut self, attribute: &str) -> Result<()> {
        let position = self.attribute_position(attribute)?;
        let index = AttributeIndex::build(attribute, position, &self.rows, OrderedIndex::new());
        debug!(
            attribute,
            rows = self.rows.len(),
            keys = index.index().key_count(),
            "built ordered index"
        );
        self.ordered_index = Some(index);
        Ok(())
    }

    /// Builds an index of the given kind on `attribute`.
    pub fn build_index(&mut self, kind: IndexKind, attribute: &str) -> Result<()> {
        match kind {
            IndexKind::Hash => self.build_hash_index(attribute),
            IndexKind::Ordered => self.build_ordered_index(attribute),
        }
    }

    /// Returns the hash index, if any.
    pub fn hash_index(&self) -> Option<&AttributeIndex<HashIndex<Value>>> {
        self.hash_index.as_ref()
    }

    /// Returns the ordered index, if any.
    pub fn ordered_index(&self) -> Option<&AttributeIndex<OrderedIndex<Value>>> {
        self.ordered_index.as_ref()
    }

    /// Returns the index kind covering `attribute`, preferring the hash index when
    /// both kinds are bound to it.
    pub fn index_kind_on(&self, attribute: &str) -> Option<IndexKind> {
        if self.hash_index.as_ref().is_some_and(|i| i.attribute == attribute) {
            Some(IndexKind::Hash)
        } else if self.ordered_index.as_ref().is_some_and(|i| i.attribute == attribute) {
            Some(IndexKind::Ordered)
        } else {
            None
        }
    }

    /// Looks up row positions in the hash index; empty when there is no hash index
    /// or the key is absent.
    pub fn lookup_hash(&self, key: &Value) -> &[RowPos] {
        self.hash_index.as_ref().map(|i| i.lookup(key)).unwrap_or(&[])
    }

    /// Looks up row positions in the ordered index; empty when there is no ordered
    /// index or the key is absent.
    pub fn lookup_ordered(&self, key: &Value) -> &[RowPos] {
        self.ordered_index.as_ref().map(|i| i.lookup(key)).unwrap_or(&[])
    }

    /// Looks up row positions in the index of the given kind.
    pub fn lookup(&self, kind: IndexKind, key: &Value) -> &[RowPos] {
        match kind {
            IndexKind::Hash => self.lookup_hash(key),
            IndexKind::Ordered => self.lookup_ordered(key),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for record in &self.rows {
            for (i, value) in record.values().iter().enumerate() {
                if i > 0 {
                    f.write_str("|")?;
                }
                write!(f, "{}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

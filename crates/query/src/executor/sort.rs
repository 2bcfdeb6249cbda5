//! Sort executor.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use relq_core::{Record, Result};
use relq_storage::Table;

/// Sort executor - stable ascending sort by a list of attributes.
///
/// The first attribute is the most significant key; rows with equal keys keep their
/// original relative order.
pub struct SortExecutor {
    attributes: Vec<String>,
}

impl SortExecutor {
    /// Creates a new sort executor.
    pub fn new(attributes: Vec<String>) -> Self {
        Self { attributes }
    }

    /// Executes the sort on `table`.
    pub fn execute(&self, table: &Table) -> Result<Table> {
        let positions = self
            .attributes
            .iter()
            .map(|a| table.attribute_position(a))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = table.rows().to_vec();
        rows.sort_by(|a, b| compare_records(a, b, &positions));
        Table::with_rows(table.header().clone(), rows)
    }
}

fn compare_records(a: &Record, b: &Record, positions: &[usize]) -> Ordering {
    for &pos in positions {
        let cmp = a.values()[pos].cmp(&b.values()[pos]);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }
    Ordering::Equal
}

//! Concat executor.

use alloc::vec::Vec;
use relq_core::{Error, Result};
use relq_storage::Table;

/// Appends `right`'s rows after `left`'s.
///
/// Both headers must hold the same attribute names at the same positions; otherwise
/// the operation fails with `SchemaMismatch`.
pub fn concat(left: &Table, right: &Table) -> Result<Table> {
    if left.header() != right.header() {
        return Err(Error::schema_mismatch(
            alloc::format!("{}", left.header()),
            alloc::format!("{}", right.header()),
        ));
    }
    let mut rows = Vec::with_capacity(left.len() + right.len());
    rows.extend_from_slice(left.rows());
    rows.extend_from_slice(right.rows());
    Table::with_rows(left.header().clone(), rows)
}

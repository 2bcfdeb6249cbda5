//! Index Nested Loop Join implementation.
//!
//! Each outer row looks its key up in the build side's index; the full condition
//! is re-tested on every candidate pair before it is accepted.

use crate::eval::CompiledCondition;
use crate::planner::JoinHint;
use alloc::vec::Vec;
use relq_core::{Record, Result};
use relq_storage::Table;

/// Joins `left` (table1) and `right` (table2) through the index named by `hint`.
///
/// Output rows follow outer-side order, then the index's match order, and always hold
/// table1's values before table2's.
pub fn index_join(
    left: &Table,
    right: &Table,
    condition: &CompiledCondition,
    hint: &JoinHint,
) -> Result<Vec<Record>> {
    let reverse = hint.reverse();
    let (build, outer) = if reverse { (right, left) } else { (left, right) };
    let outer_pos = outer.attribute_position(&hint.lookup_attribute)?;

    let mut result = Vec::new();
    for outer_row in outer.rows() {
        let key = &outer_row.values()[outer_pos];
        for &pos in build.lookup(hint.kind, key) {
            let build_row = &build.rows()[pos];
            let (l, r) = if reverse {
                (outer_row, build_row)
            } else {
                (build_row, outer_row)
            };
            if condition.eval(&[l, r])? {
                result.push(l.concat(r));
            }
        }
    }
    Ok(result)
}

//! Nested Loop Join implementation.

use crate::eval::CompiledCondition;
use alloc::vec::Vec;
use relq_core::{Record, Result};
use relq_storage::Table;

/// Tests every (table1 row, table2 row) pair, table1 in the outer loop.
pub fn nested_loop_join(
    left: &Table,
    right: &Table,
    condition: &CompiledCondition,
) -> Result<Vec<Record>> {
    let mut result = Vec::new();
    for l in left.rows() {
        for r in right.rows() {
            if condition.eval(&[l, r])? {
                result.push(l.concat(r));
            }
        }
    }
    Ok(result)
}

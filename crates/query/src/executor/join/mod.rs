//! Join executors.
//!
//! Both strategies produce table1's columns before table2's, each attribute renamed
//! `{table}_{attribute}` after the table it came from.

mod index;
mod nested;

pub use index::index_join;
pub use nested::nested_loop_join;

use crate::eval::CompiledCondition;
use crate::planner::JoinHint;
use alloc::format;
use relq_core::{Header, Result};
use relq_storage::Table;
use tracing::trace;

/// Join executor - pairs rows of two named tables that satisfy a condition.
pub struct JoinExecutor<'a> {
    left_name: &'a str,
    right_name: &'a str,
    condition: CompiledCondition,
    hint: Option<JoinHint>,
}

impl<'a> JoinExecutor<'a> {
    /// Creates a join executor using a nested loop.
    pub fn new(left_name: &'a str, right_name: &'a str, condition: CompiledCondition) -> Self {
        Self {
            left_name,
            right_name,
            condition,
            hint: None,
        }
    }

    /// Lets the executor look rows up in an index instead of looping over every pair.
    pub fn with_hint(mut self, hint: Option<JoinHint>) -> Self {
        self.hint = hint;
        self
    }

    /// Executes the join of `left` (table1) and `right` (table2).
    pub fn execute(&self, left: &Table, right: &Table) -> Result<Table> {
        let header = join_header(self.left_name, left.header(), self.right_name, right.header());
        let rows = match &self.hint {
            Some(hint) if hint_is_current(hint, left, right) => {
                trace!(reverse = hint.reverse(), "join by index lookup");
                index_join(left, right, &self.condition, hint)?
            }
            _ => nested_loop_join(left, right, &self.condition)?,
        };
        Table::with_rows(header, rows)
    }
}

/// Builds the result header: `{left_name}_{attr}` for table1, then table2.
pub fn join_header(left_name: &str, left: &Header, right_name: &str, right: &Header) -> Header {
    let names = left
        .names()
        .iter()
        .map(|a| format!("{}_{}", left_name, a))
        .chain(right.names().iter().map(|a| format!("{}_{}", right_name, a)));
    Header::from_names(names)
}

fn hint_is_current(hint: &JoinHint, left: &Table, right: &Table) -> bool {
    let build = if hint.reverse() { right } else { left };
    build.index_kind_on(&hint.build_attribute) == Some(hint.kind)
}

//! Select executor.

use crate::eval::{eval_all, eval_any, BoundComparison, CompiledCondition};
use crate::ast::Connective;
use crate::planner::IndexHint;
use alloc::vec::Vec;
use relq_core::{Record, Result, RowPos};
use relq_storage::Table;
use tracing::trace;

/// Select executor - keeps the rows satisfying a condition, in table order.
pub struct SelectExecutor {
    condition: CompiledCondition,
    hint: Option<IndexHint>,
}

impl SelectExecutor {
    /// Creates a new select executor that scans every row.
    pub fn new(condition: CompiledCondition) -> Self {
        Self {
            condition,
            hint: None,
        }
    }

    /// Lets the executor narrow candidates with an index lookup.
    pub fn with_hint(mut self, hint: Option<IndexHint>) -> Self {
        self.hint = hint;
        self
    }

    /// Executes the selection on `table`.
    pub fn execute(&self, table: &Table) -> Result<Table> {
        match self.condition.connective() {
            Connective::And => select_and(table, self.condition.clauses(), self.hint.as_ref()),
            Connective::Or => select_or(table, self.condition.clauses()),
        }
    }
}

/// Selects rows satisfying one comparison.
pub fn select(table: &Table, clause: &BoundComparison, hint: Option<&IndexHint>) -> Result<Table> {
    select_and(table, core::slice::from_ref(clause), hint)
}

/// Selects rows satisfying every clause.
///
/// With a hint, only the rows the index returns for the hint key are tested; every
/// clause is still evaluated on each of them.
pub fn select_and(
    table: &Table,
    clauses: &[BoundComparison],
    hint: Option<&IndexHint>,
) -> Result<Table> {
    match candidates(table, hint) {
        Some(positions) => {
            trace!(candidates = positions.len(), "select by index lookup");
            let rows = positions.iter().map(|&pos| &table.rows()[pos]);
            collect(table, rows, |r| eval_all(clauses, &[r]))
        }
        None => collect(table, table.rows().iter(), |r| eval_all(clauses, &[r])),
    }
}

/// Selects rows satisfying at least one clause. Always a full scan.
pub fn select_or(table: &Table, clauses: &[BoundComparison]) -> Result<Table> {
    collect(table, table.rows().iter(), |r| eval_any(clauses, &[r]))
}

/// Returns the matching positions when the hint matches an index the table still holds.
fn candidates<'a>(table: &'a Table, hint: Option<&IndexHint>) -> Option<&'a [RowPos]> {
    let hint = hint?;
    if table.index_kind_on(&hint.attribute) != Some(hint.kind) {
        return None;
    }
    Some(table.lookup(hint.kind, &hint.key))
}

fn collect<'a>(
    table: &Table,
    rows: impl Iterator<Item = &'a Record>,
    mut keep: impl FnMut(&Record) -> Result<bool>,
) -> Result<Table> {
    let mut out = Vec::new();
    for record in rows {
        if keep(record)? {
            out.push(record.clone());
        }
    }
    Table::with_rows(table.header().clone(), out)
}

//! Project executor.

use alloc::string::String;
use alloc::vec::Vec;
use relq_core::{Record, Result};
use relq_storage::Table;

/// Project executor - keeps the requested attributes.
///
/// Result columns follow the table's header order, not the requested order, and
/// requested names absent from the header are dropped.
pub struct ProjectExecutor {
    attributes: Vec<String>,
}

impl ProjectExecutor {
    /// Creates a new project executor.
    pub fn new(attributes: Vec<String>) -> Self {
        Self { attributes }
    }

    /// Executes the projection on `table`.
    pub fn execute(&self, table: &Table) -> Result<Table> {
        let positions = table.header().subset_positions(self.attributes.as_slice());
        let header = table.header().pick(&positions);
        let rows: Vec<Record> = table.rows().iter().map(|r| r.pick(&positions)).collect();
        Table::with_rows(header, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_core::Value;
    use relq_storage::codec::parse_table;

    fn project(table: &Table, attrs: &[&str]) -> Table {
        ProjectExecutor::new(attrs.iter().map(|a| String::from(*a)).collect())
            .execute(table)
            .unwrap()
    }

    #[test]
    fn test_project_header_order() {
        let t = parse_table("saleid|qty|pricerange\n1|5|cheap\n2|6|outrageous\n").unwrap();
        let result = project(&t, &["pricerange", "saleid"]);

        assert_eq!(result.header().names(), &["saleid", "pricerange"]);
        assert_eq!(
            result.rows()[1].values(),
            &[Value::Int(2), Value::from("outrageous")]
        );
    }

    #[test]
    fn test_project_drops_unknown() {
        let t = parse_table("a|b\n1|2\n").unwrap();
        let result = project(&t, &["b", "zzz"]);
        assert_eq!(result.header().names(), &["b"]);
        assert_eq!(result.rows()[0].values(), &[Value::Int(2)]);

        let none = project(&t, &["zzz"]);
        assert!(none.header().is_empty());
        assert_eq!(none.len(), 1);
        assert!(none.rows()[0].is_empty());
    }
}

//! Condition runner - parses, binds, plans and executes conditional operators.

use crate::eval::{compile_join, compile_select};
use crate::executor::{JoinExecutor, SelectExecutor};
use crate::parser::parse_condition;
use crate::planner::{plan_join, plan_select};
use relq_core::Result;
use relq_storage::Table;
use tracing::debug;

/// Runs `select(table, condition)`.
pub fn select_where(table: &Table, condition: &str) -> Result<Table> {
    let parsed = parse_condition(condition)?;
    let compiled = compile_select(&parsed, table.header())?;
    let hint = plan_select(&parsed, table);
    debug!(condition, indexed = hint.is_some(), "select");
    SelectExecutor::new(compiled).with_hint(hint).execute(table)
}

/// Runs `join(left, right, condition)`, naming result columns after the tables.
pub fn join_where(
    left_name: &str,
    left: &Table,
    right_name: &str,
    right: &Table,
    condition: &str,
) -> Result<Table> {
    let parsed = parse_condition(condition)?;
    let compiled = compile_join(&parsed, left.header(), right.header())?;
    let hint = plan_join(&parsed, left, right);
    debug!(condition, indexed = hint.is_some(), "join");
    JoinExecutor::new(left_name, right_name, compiled)
        .with_hint(hint)
        .execute(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_core::{Error, Value};
    use relq_storage::codec::parse_table;

    #[test]
    fn test_select_where() {
        let mut t = parse_table("id|qty\n1|10\n2|20\n3|10\n").unwrap();
        t.build_hash_index("qty").unwrap();
        let result = select_where(&t, "qty = 10").unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.rows()[1].values()[0], Value::Int(3));
    }

    #[test]
    fn test_select_where_errors() {
        let t = parse_table("id|qty\n1|10\n").unwrap();
        assert!(matches!(
            select_where(&t, "qty =="),
            Err(Error::MalformedExpression { .. })
        ));
        assert_eq!(
            select_where(&t, "price = 1").unwrap_err(),
            Error::attribute_not_found("price")
        );
    }

    #[test]
    fn test_join_where() {
        let r = parse_table("saleid|customerid\n1|5\n2|6\n").unwrap();
        let s = parse_table("C|state\n6|NY\n").unwrap();
        let result = join_where("R", &r, "S", &s, "R.customerid = S.C").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.header().names(), &["R_saleid", "R_customerid", "S_C", "S_state"]);
    }
}

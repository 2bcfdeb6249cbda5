//! Property-based tests for joins.
//!
//! Index-assisted joins must produce the same rows as a nested loop over every pair,
//! whichever side holds the index.

use proptest::prelude::*;
use relq_core::{Header, Record, Value};
use relq_query::executor::join_where;
use relq_storage::{IndexKind, Table};

/// Small key domain so joins actually match.
fn key_strategy() -> impl Strategy<Value = i64> {
    0i64..8
}

fn table_strategy(names: [&'static str; 2], max_rows: usize) -> impl Strategy<Value = Table> {
    prop::collection::vec((key_strategy(), -50i64..50), 0..max_rows).prop_map(move |pairs| {
        let rows = pairs
            .into_iter()
            .map(|(k, v)| Record::new(vec![Value::Int(k), Value::Int(v)]))
            .collect();
        Table::with_rows(Header::from_names(names), rows).unwrap()
    })
}

fn kind_strategy() -> impl Strategy<Value = IndexKind> {
    prop_oneof![Just(IndexKind::Hash), Just(IndexKind::Ordered)]
}

fn sorted_rows(table: &Table) -> Vec<Record> {
    let mut rows = table.rows().to_vec();
    rows.sort();
    rows
}

proptest! {
    /// Property: an index on table2 does not change the join result.
    #[test]
    fn index_on_right_equals_nested_loop(
        r in table_strategy(["id", "qty"], 30),
        s in table_strategy(["rid", "q"], 30),
        kind in kind_strategy(),
    ) {
        let scan = join_where("R", &r, "S", &s, "R.id = S.rid").unwrap();

        let mut indexed = s.clone();
        indexed.build_index(kind, "rid").unwrap();
        let via_index = join_where("R", &r, "S", &indexed, "R.id = S.rid").unwrap();

        prop_assert_eq!(via_index.header(), scan.header());
        prop_assert_eq!(sorted_rows(&via_index), sorted_rows(&scan));
    }

    /// Property: an index on table1 does not change the join result or column order.
    #[test]
    fn index_on_left_equals_nested_loop(
        r in table_strategy(["id", "qty"], 30),
        s in table_strategy(["rid", "q"], 30),
        kind in kind_strategy(),
    ) {
        let scan = join_where("R", &r, "S", &s, "R.id = S.rid").unwrap();

        let mut indexed = r.clone();
        indexed.build_index(kind, "id").unwrap();
        let via_index = join_where("R", &indexed, "S", &s, "R.id = S.rid").unwrap();

        prop_assert_eq!(sorted_rows(&via_index), sorted_rows(&scan));
        for row in via_index.rows() {
            prop_assert_eq!(&row.values()[0], &row.values()[2]);
        }
    }

    /// Property: AND joins re-test every clause on index candidates.
    #[test]
    fn and_join_index_equals_nested_loop(
        r in table_strategy(["id", "qty"], 25),
        s in table_strategy(["rid", "q"], 25),
        kind in kind_strategy(),
    ) {
        let cond = "(R.id = S.rid) and (R.qty > S.q)";
        let scan = join_where("R", &r, "S", &s, cond).unwrap();

        let mut indexed = s.clone();
        indexed.build_index(kind, "rid").unwrap();
        let via_index = join_where("R", &r, "S", &indexed, cond).unwrap();

        prop_assert_eq!(sorted_rows(&via_index), sorted_rows(&scan));
    }

    /// Property: the join size equals the number of matching pairs.
    #[test]
    fn join_count_correct(
        r in table_strategy(["id", "qty"], 30),
        s in table_strategy(["rid", "q"], 30),
    ) {
        let result = join_where("R", &r, "S", &s, "R.id = S.rid").unwrap();
        let expected = r
            .rows()
            .iter()
            .map(|a| s.rows().iter().filter(|b| a.values()[0] == b.values()[0]).count())
            .sum::<usize>();
        prop_assert_eq!(result.len(), expected);
    }
}

#[test]
fn empty_sides_produce_empty_results() {
    let header = Header::from_names(["id", "qty"]);
    let empty = Table::new(header.clone());
    let full = Table::with_rows(
        Header::from_names(["rid", "q"]),
        vec![Record::new(vec![Value::Int(1), Value::Int(2)])],
    )
    .unwrap();

    let mut indexed_empty = empty.clone();
    indexed_empty.build_hash_index("id").unwrap();

    assert!(join_where("R", &empty, "S", &full, "R.id = S.rid").unwrap().is_empty());
    assert!(join_where("R", &indexed_empty, "S", &full, "R.id = S.rid").unwrap().is_empty());
    assert!(join_where("S", &full, "R", &empty, "S.rid = R.id").unwrap().is_empty());
}

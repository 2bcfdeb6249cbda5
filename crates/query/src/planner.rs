//! Index planner.
//!
//! Inspects a parsed condition and the target tables' index metadata and picks an
//! equality clause an operator can answer with an index lookup. A hint only prunes
//! candidate rows: operators still evaluate the full condition on every candidate.

use crate::ast::{ArithOp, Comparison, Condition, Connective, Operand, RelOp};
use alloc::string::String;
use alloc::vec::Vec;
use relq_core::Value;
use relq_storage::{IndexKind, Table};
use tracing::debug;

/// An index lookup usable by selection: rows whose `attribute` equals `key`.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexHint {
    pub attribute: String,
    pub key: Value,
    pub kind: IndexKind,
}

/// Which join input holds the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildSide {
    /// table1 is indexed; table2's rows supply lookup keys.
    Left,
    /// table2 is indexed; table1's rows supply lookup keys.
    Right,
}

/// An index lookup usable by joins.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinHint {
    pub build: BuildSide,
    /// Indexed attribute on the build side.
    pub build_attribute: String,
    /// Attribute on the outer side whose value is looked up.
    pub lookup_attribute: String,
    pub kind: IndexKind,
}

impl JoinHint {
    /// True when the build side is table2, so outer rows come from table1.
    pub fn reverse(&self) -> bool {
        self.build == BuildSide::Right
    }
}

/// Plans an index lookup for a selection.
///
/// Clauses are scanned in source order and the last qualifying one wins. OR
/// conditions never use an index.
pub fn plan_select(condition: &Condition, table: &Table) -> Option<IndexHint> {
    if condition.connective() == Connective::Or {
        return None;
    }

    let mut hint = None;
    for clause in condition.clauses() {
        if let Some(candidate) = equality_hint(clause, table) {
            hint = Some(candidate);
        }
    }
    debug!(?hint, "planned select");
    hint
}

/// Builds a hint from an equality between an indexed attribute (bare or inside
/// arithmetic) and a literal.
fn equality_hint(clause: &Comparison, table: &Table) -> Option<IndexHint> {
    if clause.op != RelOp::Eq {
        return None;
    }
    let (operand, literal) = match (&clause.left, &clause.right) {
        (Operand::Literal(v), other) | (other, Operand::Literal(v)) => (other, v),
        _ => return None,
    };
    let attribute = match operand {
        Operand::Attribute(attribute) | Operand::Arithmetic { attribute, .. } => attribute,
        Operand::Literal(_) => return None,
    };
    let kind = table.index_kind_on(&attribute.name)?;

    let key = match operand {
        Operand::Arithmetic {
            op, literal: k, ..
        } => inverted_key(table, kind, *op, *k, literal.to_f64()?)?,
        _ => literal.clone(),
    };
    Some(IndexHint {
        attribute: attribute.name.clone(),
        key,
        kind,
    })
}

/// Magnitude from which `f64` no longer holds every integer exactly.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Longest run of adjacent floats an inverted key may stand for.
const MAX_PREIMAGE: usize = 8;

/// Recovers the stored key `v` for which `v op k` evaluates to `target`.
///
/// Float arithmetic rounds, so undoing it can land beside the stored value
/// (`15 * 1.1 = 16.5` but `16.5 / 1.1 = 14.999999999999998`), and several adjacent
/// floats can round onto the same result. Each operation is monotonic in `v`, so
/// the values reaching `target` form one contiguous run. The run is collected and
/// checked against the index: a hint is only returned when at most one of its keys
/// is present, otherwise the selection scans.
fn inverted_key(table: &Table, kind: IndexKind, op: ArithOp, k: f64, target: f64) -> Option<Value> {
    let hits = |v: f64| op.apply(v, k) == target;
    let guess = op.inverse().apply(target, k);
    if !guess.is_finite() || guess.abs() >= EXACT_INT_LIMIT {
        return None;
    }
    let start = [guess, next_up(guess), next_down(guess)]
        .into_iter()
        .find(|&v| hits(v))?;

    let mut run = Vec::new();
    run.push(start);
    for step in [next_down as fn(f64) -> f64, next_up] {
        let mut v = step(start);
        while hits(v) {
            if run.len() == MAX_PREIMAGE {
                return None;
            }
            run.push(v);
            v = step(v);
        }
    }

    let mut present = run
        .iter()
        .map(|&v| Value::Float(v))
        .filter(|key| !table.lookup(kind, key).is_empty());
    match (present.next(), present.next()) {
        (Some(key), None) => Some(key),
        // No stored value reaches the literal; the lookup comes back empty.
        (None, _) => Some(Value::Float(start)),
        _ => None,
    }
}

fn next_up(v: f64) -> f64 {
    if v.is_nan() || v == f64::INFINITY {
        return v;
    }
    if v == 0.0 {
        return f64::from_bits(1);
    }
    let bits = v.to_bits();
    f64::from_bits(if v > 0.0 { bits + 1 } else { bits - 1 })
}

fn next_down(v: f64) -> f64 {
    -next_up(-v)
}

/// Plans an index lookup for a join of `left` (table1) and `right` (table2).
///
/// A clause qualifies when it is an equality between two bare attributes. The left
/// operand's table is checked for an index before the right operand's, and the last
/// qualifying clause wins. OR conditions never use an index.
pub fn plan_join(condition: &Condition, left: &Table, right: &Table) -> Option<JoinHint> {
    if condition.connective() == Connective::Or {
        return None;
    }

    let mut hint = None;
    for clause in condition.clauses() {
        if clause.op != RelOp::Eq {
            continue;
        }
        let (Some(a1), Some(a2)) = (clause.left.bare_attribute(), clause.right.bare_attribute())
        else {
            continue;
        };

        if let Some(kind) = left.index_kind_on(&a1.name) {
            hint = Some(JoinHint {
                build: BuildSide::Left,
                build_attribute: a1.name.clone(),
                lookup_attribute: a2.name.clone(),
                kind,
            });
        } else if let Some(kind) = right.index_kind_on(&a2.name) {
            hint = Some(JoinHint {
                build: BuildSide::Right,
                build_attribute: a2.name.clone(),
                lookup_attribute: a1.name.clone(),
                kind,
            });
        }
    }
    debug!(?hint, "planned join");
    hint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_condition;
    use alloc::format;
    use relq_storage::codec::parse_table;

    fn sales() -> Table {
        parse_table("saleid|itemid|qty\n1|7|60\n2|8|30\n3|7|10\n").unwrap()
    }

    fn plan(cond: &str, table: &Table) -> Option<IndexHint> {
        plan_select(&parse_condition(cond).unwrap(), table)
    }

    #[test]
    fn test_no_index_no_hint() {
        assert_eq!(plan("qty = 30", &sales()), None);
    }

    #[test]
    fn test_equality_on_indexed_attribute() {
        let mut t = sales();
        t.build_hash_index("qty").unwrap();
        assert_eq!(
            plan("qty = 30", &t),
            Some(IndexHint {
                attribute: "qty".into(),
                key: Value::Int(30),
                kind: IndexKind::Hash,
            })
        );
        assert_eq!(plan("30 = qty", &t).map(|h| h.key), Some(Value::Int(30)));
        assert_eq!(plan("qty > 30", &t), None);
        assert_eq!(plan("itemid = 7", &t), None);
    }

    #[test]
    fn test_arithmetic_is_inverted() {
        let mut t = sales();
        t.build_ordered_index("qty").unwrap();
        let key = |cond| plan(cond, &t).map(|h| h.key);

        assert_eq!(key("qty / 2 = 30"), Some(Value::Float(60.0)));
        assert_eq!(key("30 = qty / 2"), Some(Value::Float(60.0)));
        assert_eq!(key("qty * 2 = 60"), Some(Value::Float(30.0)));
        assert_eq!(key("qty - 5 = 25"), Some(Value::Float(30.0)));
        assert_eq!(key("qty + 5 = 35"), Some(Value::Float(30.0)));
        assert_eq!(key("qty * 0 = 5"), None);
        assert_eq!(plan("qty / 2 = 30", &t).map(|h| h.kind), Some(IndexKind::Ordered));
    }

    #[test]
    fn test_inexact_inversion_finds_stored_key() {
        let mut t = parse_table("id|qty\n1|15\n2|4\n3|29\n").unwrap();
        t.build_hash_index("qty").unwrap();
        let key = |cond: &str| plan(cond, &t).map(|h| h.key);

        // 16.5 / 1.1 is 14.999999999999998, one float below the stored 15.
        assert_eq!(key("qty * 1.1 = 16.5"), Some(Value::Float(15.0)));
        assert_eq!(key("qty + 0.1 = 4.1"), Some(Value::Float(4.0)));
        let literal = 29.0 / 7.0;
        assert_eq!(key(&format!("qty / 7 = {}", literal)), Some(Value::Float(29.0)));
    }

    #[test]
    fn test_ambiguous_inversion_scans() {
        let near_30 = f64::from_bits(30f64.to_bits() + 1);
        let mut t = Table::with_rows(
            relq_core::Header::from_names(["qty"]),
            alloc::vec![
                relq_core::Record::new(alloc::vec![Value::Int(30)]),
                relq_core::Record::new(alloc::vec![Value::Float(near_30)]),
            ],
        )
        .unwrap();
        t.build_ordered_index("qty").unwrap();

        // Both 30 and the float just above it round onto 35.
        assert_eq!(near_30 + 5.0, 35.0);
        assert_eq!(plan("qty + 5 = 35", &t), None);
        // Zero has an unbounded run of subnormal neighbours.
        assert_eq!(plan("qty / 7 = 0", &t), None);
    }

    #[test]
    fn test_unmatched_inversion_keeps_hint() {
        let mut t = sales();
        t.build_hash_index("qty").unwrap();
        assert_eq!(plan("qty * 2 = 1000", &t).map(|h| h.key), Some(Value::Float(500.0)));
    }

    #[test]
    fn test_float_neighbours() {
        assert_eq!(next_up(1.0), 1.0 + f64::EPSILON);
        assert_eq!(next_down(1.0 + f64::EPSILON), 1.0);
        assert_eq!(next_up(0.0), f64::from_bits(1));
        assert_eq!(next_down(0.0), -f64::from_bits(1));
        assert_eq!(next_up(-1.0), -(1.0 - f64::EPSILON / 2.0));
    }

    #[test]
    fn test_last_qualifying_clause_wins() {
        let mut t = sales();
        t.build_hash_index("qty").unwrap();
        t.build_ordered_index("itemid").unwrap();

        let hint = plan("(qty = 30) and (itemid = 7)", &t).unwrap();
        assert_eq!(hint.attribute, "itemid");
        assert_eq!(hint.kind, IndexKind::Ordered);

        let hint = plan("(itemid = 7) and (qty = 30) and (saleid = 1)", &t).unwrap();
        assert_eq!(hint.attribute, "qty");
    }

    #[test]
    fn test_or_never_uses_index() {
        let mut t = sales();
        t.build_hash_index("qty").unwrap();
        assert_eq!(plan("(qty = 30) or (qty = 60)", &t), None);
    }

    #[test]
    fn test_join_left_checked_first() {
        let mut r = parse_table("saleid|customerid\n1|5\n").unwrap();
        let mut s = parse_table("C|state\n5|NY\n").unwrap();
        let cond = parse_condition("R.customerid = S.C").unwrap();

        assert_eq!(plan_join(&cond, &r, &s), None);

        s.build_hash_index("C").unwrap();
        let hint = plan_join(&cond, &r, &s).unwrap();
        assert_eq!(hint.build, BuildSide::Right);
        assert!(hint.reverse());
        assert_eq!(hint.build_attribute, "C");
        assert_eq!(hint.lookup_attribute, "customerid");

        r.build_ordered_index("customerid").unwrap();
        let hint = plan_join(&cond, &r, &s).unwrap();
        assert_eq!(hint.build, BuildSide::Left);
        assert!(!hint.reverse());
        assert_eq!(hint.kind, IndexKind::Ordered);
        assert_eq!(hint.lookup_attribute, "C");
    }

    #[test]
    fn test_join_arithmetic_disqualifies() {
        let r = parse_table("qty\n1\n").unwrap();
        let mut s = parse_table("Q\n1\n").unwrap();
        s.build_hash_index("Q").unwrap();

        let cond = parse_condition("R.qty = S.Q * 2").unwrap();
        assert_eq!(plan_join(&cond, &r, &s), None);
        let cond = parse_condition("(R.qty > S.Q) or (R.qty = S.Q)").unwrap();
        assert_eq!(plan_join(&cond, &r, &s), None);
    }
}

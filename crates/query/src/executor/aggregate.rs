//! Aggregate executors: whole-table and grouped sum, avg and count.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashMap;
use relq_core::{DataType, Error, Header, Record, Result, Value};
use relq_storage::Table;

/// Aggregate functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregateFunc {
    Sum,
    Avg,
    Count,
}

impl AggregateFunc {
    /// Name used in errors and scalar result headers.
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunc::Sum => "sum",
            AggregateFunc::Avg => "avg",
            AggregateFunc::Count => "count",
        }
    }

    /// Name used in grouped result headers.
    pub fn group_name(&self) -> &'static str {
        match self {
            AggregateFunc::Sum => "sumgroup",
            AggregateFunc::Avg => "avggroup",
            AggregateFunc::Count => "countgroup",
        }
    }
}

/// Running sum that stays integral until a float (or an overflow) shows up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Sum {
    Int(i64),
    Float(f64),
}

impl Sum {
    fn add(self, value: &Value, op: &str) -> Result<Sum> {
        Ok(match (self, value) {
            (Sum::Int(acc), Value::Int(v)) => match acc.checked_add(*v) {
                Some(s) => Sum::Int(s),
                None => Sum::Float(acc as f64 + *v as f64),
            },
            (Sum::Int(acc), Value::Float(v)) => Sum::Float(acc as f64 + v),
            (Sum::Float(acc), Value::Int(v)) => Sum::Float(acc + *v as f64),
            (Sum::Float(acc), Value::Float(v)) => Sum::Float(acc + v),
            (_, Value::Str(_)) => {
                return Err(Error::type_mismatch(op, DataType::Text, DataType::Integer))
            }
        })
    }

    fn as_f64(self) -> f64 {
        match self {
            Sum::Int(v) => v as f64,
            Sum::Float(v) => v,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Sum::Int(v) => Value::Int(v),
            Sum::Float(v) => Value::Float(v),
        }
    }
}

/// Sum and row count of a set of values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Accumulator {
    sum: Sum,
    count: usize,
}

impl Accumulator {
    pub(crate) fn new() -> Self {
        Self {
            sum: Sum::Int(0),
            count: 0,
        }
    }

    /// Adds a value; text fails with `TypeMismatch` naming `op`.
    pub(crate) fn add(&mut self, value: &Value, op: &str) -> Result<()> {
        self.sum = self.sum.add(value, op)?;
        self.count += 1;
        Ok(())
    }

    /// Counts a row without reading a value.
    fn tally(&mut self) {
        self.count += 1;
    }

    /// Produces the aggregate value. Sum keeps the running sum's type, avg is always
    /// a float, count an integer.
    pub(crate) fn finish(&self, func: AggregateFunc) -> Value {
        match func {
            AggregateFunc::Sum => self.sum.into_value(),
            AggregateFunc::Avg => Value::Float(self.sum.as_f64() / self.count as f64),
            AggregateFunc::Count => Value::Int(self.count as i64),
        }
    }
}

/// Sums `attribute` over all rows into a one-row table headed `sum{attribute}`.
pub fn sum(table: &Table, attribute: &str) -> Result<Table> {
    scalar(table, attribute, AggregateFunc::Sum)
}

/// Averages `attribute` over all rows into a one-row table headed `avg{attribute}`.
pub fn avg(table: &Table, attribute: &str) -> Result<Table> {
    scalar(table, attribute, AggregateFunc::Avg)
}

/// Counts rows into a one-row table headed `count{table_name}`.
pub fn count(table: &Table, table_name: &str) -> Result<Table> {
    Table::with_rows(
        Header::from_names([format!("count{}", table_name)]),
        vec![Record::new(vec![Value::Int(table.len() as i64)])],
    )
}

fn scalar(table: &Table, attribute: &str, func: AggregateFunc) -> Result<Table> {
    let position = table.attribute_position(attribute)?;
    if table.is_empty() {
        return Err(Error::empty_aggregate(func.name()));
    }
    let mut acc = Accumulator::new();
    for record in table.rows() {
        acc.add(&record.values()[position], func.name())?;
    }
    Table::with_rows(
        Header::from_names([format!("{}{}", func.name(), attribute)]),
        vec![Record::new(vec![acc.finish(func)])],
    )
}

/// Grouped aggregate executor.
///
/// Rows are partitioned by the values of the group attributes, taken in header order.
/// One row is emitted per group, in the order groups are first seen, holding the
/// aggregate followed by the group's key values.
pub struct GroupAggregateExecutor {
    func: AggregateFunc,
    attribute: String,
    group_by: Vec<String>,
}

impl GroupAggregateExecutor {
    /// Creates a new grouped aggregate executor.
    pub fn new(func: AggregateFunc, attribute: impl Into<String>, group_by: Vec<String>) -> Self {
        Self {
            func,
            attribute: attribute.into(),
            group_by,
        }
    }

    /// Executes the aggregation on `table`.
    pub fn execute(&self, table: &Table) -> Result<Table> {
        let position = table.attribute_position(&self.attribute)?;
        let group_positions = table.header().subset_positions(self.group_by.as_slice());
        let op = self.func.group_name();

        // Keys are normalized so 1 and 1.0 share a group; output keeps the first-seen values.
        let mut lookup: HashMap<Vec<Value>, usize> = HashMap::new();
        let mut groups: Vec<(Vec<Value>, Accumulator)> = Vec::new();
        for record in table.rows() {
            let key: Vec<Value> = group_positions
                .iter()
                .map(|&p| record.values()[p].to_index_key())
                .collect();
            let slot = *lookup.entry(key).or_insert_with(|| {
                groups.push((record.pick(&group_positions).into_values(), Accumulator::new()));
                groups.len() - 1
            });
            let acc = &mut groups[slot].1;
            match self.func {
                AggregateFunc::Count => acc.tally(),
                _ => acc.add(&record.values()[position], op)?,
            }
        }

        let mut names = vec![format!("{}{}", op, self.attribute)];
        names.extend(table.header().pick(&group_positions).names().iter().cloned());
        let rows = groups
            .into_iter()
            .map(|(key, acc)| {
                let mut values = Vec::with_capacity(key.len() + 1);
                values.push(acc.finish(self.func));
                values.extend(key);
                Record::new(values)
            })
            .collect();
        Table::with_rows(Header::new(names), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relq_storage::codec::parse_table;

    fn group(table: &Table, func: AggregateFunc, attr: &str, groups: &[&str]) -> Result<Table> {
        GroupAggregateExecutor::new(func, attr, groups.iter().map(|g| String::from(*g)).collect())
            .execute(table)
    }

    fn rows(table: &Table) -> Vec<Vec<Value>> {
        table.rows().iter().map(|r| r.values().to_vec()).collect()
    }

    #[test]
    fn test_sum_and_avg() {
        let t = parse_table("id|qty\n1|10\n2|20\n3|15\n").unwrap();

        let s = sum(&t, "qty").unwrap();
        assert_eq!(s.header().names(), &["sumqty"]);
        assert_eq!(rows(&s), vec![vec![Value::Int(45)]]);

        let a = avg(&t, "qty").unwrap();
        assert_eq!(a.header().names(), &["avgqty"]);
        assert_eq!(rows(&a), vec![vec![Value::Float(15.0)]]);
    }

    #[test]
    fn test_scalar_errors() {
        let empty = parse_table("id|qty\n").unwrap();
        assert_eq!(sum(&empty, "qty").unwrap_err(), Error::empty_aggregate("sum"));
        assert_eq!(avg(&empty, "qty").unwrap_err(), Error::empty_aggregate("avg"));
        assert_eq!(sum(&empty, "zzz").unwrap_err(), Error::attribute_not_found("zzz"));

        let text = parse_table("name\nabc\n").unwrap();
        assert_eq!(
            sum(&text, "name").unwrap_err(),
            Error::type_mismatch("sum", DataType::Text, DataType::Integer)
        );
    }

    #[test]
    fn test_count() {
        let t = parse_table("id\n1\n2\n").unwrap();
        let c = count(&t, "R").unwrap();
        assert_eq!(c.header().names(), &["countR"]);
        assert_eq!(rows(&c), vec![vec![Value::Int(2)]]);

        let empty = parse_table("id\n").unwrap();
        assert_eq!(rows(&count(&empty, "E").unwrap()), vec![vec![Value::Int(0)]]);
    }

    #[test]
    fn test_sumgroup_first_seen_order() {
        let t = parse_table("id|qty\n1|10\n1|5\n2|7\n").unwrap();
        let result = group(&t, AggregateFunc::Sum, "qty", &["id"]).unwrap();
        assert_eq!(result.header().names(), &["sumgroupqty", "id"]);
        assert_eq!(
            rows(&result),
            vec![vec![Value::Int(15), Value::Int(1)], vec![Value::Int(7), Value::Int(2)]]
        );
    }

    #[test]
    fn test_group_attributes_in_header_order() {
        let t = parse_table("a|b|qty\nx|1|4\ny|1|2\nx|1|6\nx|2|1\n").unwrap();
        let result = group(&t, AggregateFunc::Avg, "qty", &["b", "a"]).unwrap();
        assert_eq!(result.header().names(), &["avggroupqty", "a", "b"]);
        assert_eq!(
            rows(&result),
            vec![
                vec![Value::Float(5.0), Value::from("x"), Value::Int(1)],
                vec![Value::Float(2.0), Value::from("y"), Value::Int(1)],
                vec![Value::Float(1.0), Value::from("x"), Value::Int(2)],
            ]
        );
    }

    #[test]
    fn test_countgroup() {
        let t = parse_table("a|name\nx|p\ny|q\nx|r\n").unwrap();
        let result = group(&t, AggregateFunc::Count, "name", &["a"]).unwrap();
        assert_eq!(result.header().names(), &["countgroupname", "a"]);
        assert_eq!(
            rows(&result),
            vec![vec![Value::Int(2), Value::from("x")], vec![Value::Int(1), Value::from("y")]]
        );
        assert_eq!(
            group(&t, AggregateFunc::Count, "zzz", &["a"]).unwrap_err(),
            Error::attribute_not_found("zzz")
        );
    }

    #[test]
    fn test_group_over_empty_table() {
        let t = parse_table("a|qty\n").unwrap();
        let result = group(&t, AggregateFunc::Sum, "qty", &["a"]).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.header().names(), &["sumgroupqty", "a"]);
    }

    #[test]
    fn test_int_overflow_promotes_to_float() {
        let mut acc = Accumulator::new();
        acc.add(&Value::Int(i64::MAX), "sum").unwrap();
        acc.add(&Value::Int(1), "sum").unwrap();
        assert!(matches!(acc.finish(AggregateFunc::Sum), Value::Float(_)));
    }
}

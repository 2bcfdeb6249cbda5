//! Moving window executor.

use crate::executor::aggregate::{Accumulator, AggregateFunc};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use relq_core::{Error, Result};
use relq_storage::Table;

/// Moving window functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowFunc {
    MovSum,
    MovAvg,
}

impl WindowFunc {
    /// Name used in errors and result headers.
    pub fn name(&self) -> &'static str {
        match self {
            WindowFunc::MovSum => "movsum",
            WindowFunc::MovAvg => "movavg",
        }
    }

    fn aggregate(&self) -> AggregateFunc {
        match self {
            WindowFunc::MovSum => AggregateFunc::Sum,
            WindowFunc::MovAvg => AggregateFunc::Avg,
        }
    }
}

/// Window executor - appends a moving sum or average column.
///
/// The window for row `i` covers rows `max(0, i - size + 1)..=i` in table order, so
/// the first rows average over fewer values than `size`.
pub struct WindowExecutor {
    func: WindowFunc,
    attribute: String,
    size: usize,
}

impl WindowExecutor {
    /// Creates a new window executor.
    pub fn new(func: WindowFunc, attribute: impl Into<String>, size: usize) -> Self {
        Self {
            func,
            attribute: attribute.into(),
            size,
        }
    }

    /// Executes the window function on `table`.
    pub fn execute(&self, table: &Table) -> Result<Table> {
        if self.size == 0 {
            return Err(Error::invalid_argument(format!(
                "{} window size must be positive",
                self.func.name()
            )));
        }
        let position = table.attribute_position(&self.attribute)?;
        let rows = table.rows();

        let mut out = Vec::with_capacity(rows.len());
        for (i, record) in rows.iter().enumerate() {
            let start = (i + 1).saturating_sub(self.size);
            let mut acc = Accumulator::new();
            for r in &rows[start..=i] {
                acc.add(&r.values()[position], self.func.name())?;
            }
            out.push(record.extended(acc.finish(self.func.aggregate())));
        }

        let header = table
            .header()
            .extended(format!("{}{}", self.func.name(), self.attribute));
        Table::with_rows(header, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use relq_core::{DataType, Value};
    use relq_storage::codec::parse_table;

    fn last_column(table: &Table) -> Vec<Value> {
        table
            .rows()
            .iter()
            .map(|r| r.values()[r.len() - 1].clone())
            .collect()
    }

    fn sample() -> Table {
        parse_table("id|qty\n1|10\n2|20\n3|30\n").unwrap()
    }

    #[test]
    fn test_movsum() {
        let result = WindowExecutor::new(WindowFunc::MovSum, "qty", 2)
            .execute(&sample())
            .unwrap();
        assert_eq!(result.header().names(), &["id", "qty", "movsumqty"]);
        assert_eq!(
            last_column(&result),
            vec![Value::Int(10), Value::Int(30), Value::Int(50)]
        );
    }

    #[test]
    fn test_movavg_shrinking_divisor() {
        let result = WindowExecutor::new(WindowFunc::MovAvg, "qty", 2)
            .execute(&sample())
            .unwrap();
        assert_eq!(result.header().names(), &["id", "qty", "movavgqty"]);
        assert_eq!(
            last_column(&result),
            vec![Value::Float(10.0), Value::Float(15.0), Value::Float(25.0)]
        );
    }

    #[test]
    fn test_window_larger_than_table() {
        let result = WindowExecutor::new(WindowFunc::MovAvg, "qty", 10)
            .execute(&sample())
            .unwrap();
        assert_eq!(
            last_column(&result),
            vec![Value::Float(10.0), Value::Float(15.0), Value::Float(20.0)]
        );
    }

    #[test]
    fn test_window_errors() {
        assert!(matches!(
            WindowExecutor::new(WindowFunc::MovSum, "qty", 0).execute(&sample()),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(
            WindowExecutor::new(WindowFunc::MovSum, "zzz", 2)
                .execute(&sample())
                .unwrap_err(),
            Error::attribute_not_found("zzz")
        );
        let text = parse_table("name\nabc\n").unwrap();
        assert_eq!(
            WindowExecutor::new(WindowFunc::MovAvg, "name", 2)
                .execute(&text)
                .unwrap_err(),
            Error::type_mismatch("movavg", DataType::Text, DataType::Integer)
        );
    }
}

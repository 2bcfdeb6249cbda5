//! Pipe-delimited table text format.
//!
//! The first line is the header; every following non-blank line is one row. Fields
//! are separated by `|`. A field made only of ASCII digits loads as an integer, every
//! other field loads as text. Rendering writes the header line then one line per row,
//! each terminated by `\n`, with integral floats shown as `15.0`.

use crate::table::Table;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use relq_core::{Error, Header, Record, Result, Value};
use tracing::trace;

/// Field separator.
pub const DELIMITER: char = '|';

/// Parses a table from its text form.
///
/// Every line is trimmed of surrounding whitespace before splitting. An input with no
/// header line yields an error; a header with no rows yields an empty table.
pub fn parse_table(text: &str) -> Result<Table> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty());

    let header = match lines.next() {
        Some((_, line)) => Header::from_names(line.split(DELIMITER)),
        None => return Err(Error::invalid_argument("table text has no header line")),
    };

    let mut rows = Vec::new();
    for (line_no, line) in lines {
        let values: Vec<Value> = line.split(DELIMITER).map(Value::parse_field).collect();
        if values.len() != header.len() {
            return Err(Error::malformed_record(line_no + 1, header.len(), values.len()));
        }
        rows.push(Record::new(values));
    }

    trace!(columns = header.len(), rows = rows.len(), "parsed table");
    Table::with_rows(header, rows)
}

/// Renders a table to its text form.
pub fn render_table(table: &Table) -> String {
    table.to_string()
}

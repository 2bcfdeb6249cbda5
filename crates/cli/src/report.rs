//! Cumulative operations log.
//!
//! Every table-producing query appends its result to a single text file so a whole
//! query file's intermediate tables can be inspected afterwards.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use relq_storage::Table;

use crate::error::{CliError, Result};

/// Formats one log entry.
pub fn format_entry(name: &str, operation: &str, table: &Table) -> String {
    format!(
        "Table Name: {}    Operation Performed: {}\n\n{}\n\n\n",
        name, operation, table
    )
}

/// Appends entries to the operations log, when one is configured.
#[derive(Clone, Debug, Default)]
pub struct OperationLog {
    path: Option<PathBuf>,
}

impl OperationLog {
    /// Creates a log writing to `path`; `None` disables logging.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Returns the log path, if logging is enabled.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Appends the result of one operation. Entries from earlier runs are kept.
    pub fn record(&self, name: &str, operation: &str, table: &Table) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| CliError::io(path, e))?;
        file.write_all(format_entry(name, operation, table).as_bytes())
            .map_err(|e| CliError::io(path, e))
    }
}

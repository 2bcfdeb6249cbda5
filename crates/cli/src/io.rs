//! Table file I/O.

use std::path::{Path, PathBuf};

use relq_storage::codec::{parse_table, render_table};
use relq_storage::Table;
use tracing::debug;

use crate::config::RelqConfig;
use crate::error::{CliError, Result};

/// Resolves table file names and moves tables to and from disk.
#[derive(Clone, Debug)]
pub struct TableFiles {
    data_dir: PathBuf,
    output_dir: PathBuf,
    extension: String,
}

impl TableFiles {
    /// Creates a resolver for the directories and extension in `config`.
    pub fn new(config: &RelqConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            output_dir: config.output_dir.clone(),
            extension: config.file_extension.clone(),
        }
    }

    /// Returns the path `inputfromfile(name)` reads.
    pub fn input_path(&self, name: &str) -> PathBuf {
        self.resolve(&self.data_dir, name)
    }

    /// Returns the path `outputtofile(table, name)` writes.
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.resolve(&self.output_dir, name)
    }

    /// Reads and parses a table file.
    pub fn read_table(&self, name: &str) -> Result<Table> {
        let path = self.input_path(name);
        let text = std::fs::read_to_string(&path).map_err(|e| CliError::io(&path, e))?;
        let table = parse_table(&text).map_err(|error| CliError::TableFile {
            path: path.clone(),
            error,
        })?;
        debug!(path = %path.display(), rows = table.len(), "read table");
        Ok(table)
    }

    /// Renders a table to a file, returning the path written.
    pub fn write_table(&self, table: &Table, name: &str) -> Result<PathBuf> {
        let path = self.output_path(name);
        std::fs::write(&path, render_table(table)).map_err(|e| CliError::io(&path, e))?;
        debug!(path = %path.display(), rows = table.len(), "wrote table");
        Ok(path)
    }

    fn resolve(&self, dir: &Path, name: &str) -> PathBuf {
        let mut path = dir.join(name);
        if path.extension().is_none() && !self.extension.is_empty() {
            path.set_extension(&self.extension);
        }
        path
    }
}

//! Configuration file support for the runner.
//!
//! Loads and saves runner configuration from TOML files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Runner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelqConfig {
    /// Directory `inputfromfile` reads table files from.
    #[serde(default = "default_dir")]
    pub data_dir: PathBuf,

    /// Directory `outputtofile` writes table files to.
    #[serde(default = "default_dir")]
    pub output_dir: PathBuf,

    /// Extension appended to file names given without one.
    #[serde(default = "default_extension")]
    pub file_extension: String,

    /// Cumulative log of every table-producing operation; `None` disables it.
    #[serde(default = "default_operations_log")]
    pub operations_log: Option<PathBuf>,

    /// Report the execution time of every query.
    #[serde(default = "default_timing")]
    pub timing: bool,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_extension() -> String {
    "txt".to_string()
}

fn default_operations_log() -> Option<PathBuf> {
    Some(PathBuf::from("AllOperations.txt"))
}

fn default_timing() -> bool {
    true
}

impl Default for RelqConfig {
    fn default() -> Self {
        Self {
            data_dir: default_dir(),
            output_dir: default_dir(),
            file_extension: default_extension(),
            operations_log: default_operations_log(),
            timing: default_timing(),
        }
    }
}

impl RelqConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| CliError::io(path, e))
    }

    /// Returns a builder for configuration.
    pub fn builder() -> RelqConfigBuilder {
        RelqConfigBuilder::new()
    }
}

/// Builder for runner configuration.
#[derive(Default)]
pub struct RelqConfigBuilder {
    config: RelqConfig,
}

impl RelqConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the data directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Sets the output directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Sets the default file extension.
    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.file_extension = extension.into();
        self
    }

    /// Sets the operations log path, or disables the log with `None`.
    pub fn operations_log(mut self, path: Option<PathBuf>) -> Self {
        self.config.operations_log = path;
        self
    }

    /// Enables timing.
    pub fn timing(mut self, enabled: bool) -> Self {
        self.config.timing = enabled;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> RelqConfig {
        self.config
    }
}

//! Query session - executes query lines against a table catalog.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use relq_core::Error;
use relq_query::executor::{
    avg, concat, count, join_where, select_where, sum, AggregateFunc, GroupAggregateExecutor,
    ProjectExecutor, SortExecutor, WindowExecutor, WindowFunc,
};
use relq_storage::{IndexKind, Table};
use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::config::RelqConfig;
use crate::dispatch::{Operation, QueryLine};
use crate::error::{CliError, Result};
use crate::io::TableFiles;
use crate::report::OperationLog;

/// What a successfully executed query did.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// A table was registered.
    Created { name: String, rows: usize },
    /// A table was written to a file.
    Written { path: PathBuf },
    /// An index was attached to a registered table.
    Indexed {
        table: String,
        attribute: String,
        kind: IndexKind,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created { name, rows } => write!(f, "created {} ({} rows)", name, rows),
            Outcome::Written { path } => write!(f, "wrote {}", path.display()),
            Outcome::Indexed {
                table,
                attribute,
                kind,
            } => write!(f, "built {} index on {}.{}", kind, table, attribute),
        }
    }
}

/// Counts of executed and failed queries in one script run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// A query session.
///
/// Holds the catalog of named tables. A failing query leaves the catalog as it was.
pub struct Session {
    catalog: Catalog,
    files: TableFiles,
    log: OperationLog,
    timing: bool,
}

impl Session {
    /// Creates a session with an empty catalog.
    pub fn new(config: &RelqConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            files: TableFiles::new(config),
            log: OperationLog::new(config.operations_log.clone()),
            timing: config.timing,
        }
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Executes one query line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let query = QueryLine::parse(line)?;
        let operation = query.operation();
        let args = query.args();

        if operation.produces_table() {
            let name = query.target().ok_or_else(|| {
                Error::invalid_argument(format!("{} needs a result name", operation))
            })?;
            let table = self.evaluate(operation, args)?;
            self.log.record(name, operation.name(), &table)?;
            let rows = table.len();
            self.catalog.insert(name, table);
            return Ok(Outcome::Created {
                name: name.to_string(),
                rows,
            });
        }

        ignore_target(&query);
        if operation == Operation::OutputToFile {
            let table = self.catalog.get(&args[0])?;
            let path = self.files.write_table(table, &args[1])?;
            return Ok(Outcome::Written { path });
        }

        let kind = if operation == Operation::Hash {
            IndexKind::Hash
        } else {
            IndexKind::Ordered
        };
        self.catalog.get_mut(&args[0])?.build_index(kind, &args[1])?;
        Ok(Outcome::Indexed {
            table: args[0].clone(),
            attribute: args[1].clone(),
            kind,
        })
    }

    /// Executes every non-blank line of a script, logging failures and carrying on.
    pub fn run_script(&mut self, script: &str) -> RunSummary {
        let mut summary = RunSummary::default();
        for line in script.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let start = Instant::now();
            let result = self.execute(line);
            let elapsed = start.elapsed();

            summary.executed += 1;
            match result {
                Ok(outcome) => debug!(query = line, %outcome, "query succeeded"),
                Err(e) => {
                    summary.failed += 1;
                    error!(query = line, "{}", e);
                }
            }
            if self.timing {
                info!("Query Executed: {}", line);
                info!("Execution Time: {} sec", elapsed.as_secs_f64());
            }
        }
        summary
    }

    /// Reads a query file and runs it.
    pub fn run_file(&mut self, path: &Path) -> Result<RunSummary> {
        let script = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        Ok(self.run_script(&script))
    }

    fn evaluate(&self, operation: Operation, args: &[String]) -> Result<Table> {
        let table = match operation {
            Operation::InputFromFile => return self.files.read_table(&args[0]),
            Operation::Select => select_where(self.catalog.get(&args[0])?, &args[1])?,
            Operation::Join => join_where(
                &args[0],
                self.catalog.get(&args[0])?,
                &args[1],
                self.catalog.get(&args[1])?,
                &args[2],
            )?,
            Operation::Project => {
                ProjectExecutor::new(args[1..].to_vec()).execute(self.catalog.get(&args[0])?)?
            }
            Operation::Sum => sum(self.catalog.get(&args[0])?, &args[1])?,
            Operation::Avg => avg(self.catalog.get(&args[0])?, &args[1])?,
            Operation::Count => count(self.catalog.get(&args[0])?, &args[0])?,
            Operation::SumGroup | Operation::AvgGroup | Operation::CountGroup => {
                let func = match operation {
                    Operation::SumGroup => AggregateFunc::Sum,
                    Operation::AvgGroup => AggregateFunc::Avg,
                    _ => AggregateFunc::Count,
                };
                GroupAggregateExecutor::new(func, args[1].as_str(), args[2..].to_vec())
                    .execute(self.catalog.get(&args[0])?)?
            }
            Operation::MovSum | Operation::MovAvg => {
                let func = if operation == Operation::MovSum {
                    WindowFunc::MovSum
                } else {
                    WindowFunc::MovAvg
                };
                WindowExecutor::new(func, args[1].as_str(), window_size(&args[2])?)
                    .execute(self.catalog.get(&args[0])?)?
            }
            Operation::Sort => {
                SortExecutor::new(args[1..].to_vec()).execute(self.catalog.get(&args[0])?)?
            }
            Operation::Concat => {
                concat(self.catalog.get(&args[0])?, self.catalog.get(&args[1])?)?
            }
            Operation::OutputToFile | Operation::Hash | Operation::Btree => {
                let message = format!("{} produces no table", operation);
                return Err(Error::invalid_argument(message).into());
            }
        };
        Ok(table)
    }
}

fn ignore_target(query: &QueryLine) {
    if let Some(name) = query.target() {
        warn!(
            name,
            operation = %query.operation(),
            "operation produces no table, result name ignored"
        );
    }
}

fn window_size(arg: &str) -> Result<usize> {
    arg.parse::<usize>().map_err(|_| {
        Error::invalid_argument(format!("window size must be an integer, got '{}'", arg)).into()
    })
}

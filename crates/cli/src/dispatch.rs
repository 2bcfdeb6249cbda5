//! Query line dispatch.
//!
//! A query line is either `name := op(arg, ...)` for operations producing a table, or
//! `op(arg, ...)` for operations with no table result. Arguments are the text between
//! the first `(` and the last `)`, split on `,` and trimmed.

use std::fmt;

use relq_core::{Error, Result};

/// Assignment marker separating a result name from its operation.
const ASSIGN: &str = ":=";

/// The operations a query line can invoke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    InputFromFile,
    Select,
    Join,
    Project,
    Sum,
    Avg,
    SumGroup,
    AvgGroup,
    Count,
    CountGroup,
    MovSum,
    MovAvg,
    Sort,
    Concat,
    OutputToFile,
    /// Builds a hash index.
    Hash,
    /// Builds an ordered index.
    Btree,
}

impl Operation {
    /// Resolves an operation by its query-file name.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(match name {
            "inputfromfile" => Operation::InputFromFile,
            "select" => Operation::Select,
            "join" => Operation::Join,
            "project" => Operation::Project,
            "sum" => Operation::Sum,
            "avg" => Operation::Avg,
            "sumgroup" => Operation::SumGroup,
            "avggroup" => Operation::AvgGroup,
            "count" => Operation::Count,
            "countgroup" => Operation::CountGroup,
            "movsum" => Operation::MovSum,
            "movavg" => Operation::MovAvg,
            "sort" => Operation::Sort,
            "concat" => Operation::Concat,
            "outputtofile" => Operation::OutputToFile,
            "Hash" => Operation::Hash,
            "Btree" => Operation::Btree,
            _ => return Err(Error::operation_not_found(name)),
        })
    }

    /// Returns the query-file name.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::InputFromFile => "inputfromfile",
            Operation::Select => "select",
            Operation::Join => "join",
            Operation::Project => "project",
            Operation::Sum => "sum",
            Operation::Avg => "avg",
            Operation::SumGroup => "sumgroup",
            Operation::AvgGroup => "avggroup",
            Operation::Count => "count",
            Operation::CountGroup => "countgroup",
            Operation::MovSum => "movsum",
            Operation::MovAvg => "movavg",
            Operation::Sort => "sort",
            Operation::Concat => "concat",
            Operation::OutputToFile => "outputtofile",
            Operation::Hash => "Hash",
            Operation::Btree => "Btree",
        }
    }

    /// Returns true if the operation yields a table to register.
    pub fn produces_table(&self) -> bool {
        !matches!(
            self,
            Operation::OutputToFile | Operation::Hash | Operation::Btree
        )
    }

    /// Returns the accepted argument count as `(min, max)`; `max` is `None` for
    /// operations taking a variable attribute list.
    pub fn arity(&self) -> (usize, Option<usize>) {
        match self {
            Operation::InputFromFile | Operation::Count => (1, Some(1)),
            Operation::Select
            | Operation::Sum
            | Operation::Avg
            | Operation::Concat
            | Operation::OutputToFile
            | Operation::Hash
            | Operation::Btree => (2, Some(2)),
            Operation::Join | Operation::MovSum | Operation::MovAvg => (3, Some(3)),
            Operation::Project | Operation::Sort => (2, None),
            Operation::SumGroup | Operation::AvgGroup | Operation::CountGroup => (3, None),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed query line.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryLine {
    target: Option<String>,
    operation: Operation,
    args: Vec<String>,
}

impl QueryLine {
    /// Parses one query line.
    ///
    /// Arity is checked here, so a parsed line always carries an argument count its
    /// operation accepts.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (target, call) = match line.find(ASSIGN) {
            Some(at) => {
                let name = line[..at].trim();
                if name.is_empty() {
                    return Err(Error::malformed_expression("missing result name", 0));
                }
                (Some(name.to_string()), &line[at + ASSIGN.len()..])
            }
            None => (None, line),
        };
        let offset = line.len() - call.len();

        let open = call
            .find('(')
            .ok_or_else(|| Error::malformed_expression("expected '('", offset + call.len()))?;
        let close = call
            .rfind(')')
            .filter(|&close| close > open)
            .ok_or_else(|| Error::malformed_expression("expected ')'", offset + call.len()))?;
        if !call[close + 1..].trim().is_empty() {
            return Err(Error::malformed_expression(
                "unexpected text after ')'",
                offset + close + 1,
            ));
        }

        let operation = Operation::from_name(call[..open].trim())?;
        let inner = call[open + 1..close].trim();
        let args: Vec<String> = if inner.is_empty() {
            Vec::new()
        } else {
            inner.split(',').map(|a| a.trim().to_string()).collect()
        };

        let (min, max) = operation.arity();
        if args.len() < min || max.is_some_and(|max| args.len() > max) {
            return Err(Error::invalid_argument(format!(
                "{} takes {} arguments, got {}",
                operation,
                arity_text(min, max),
                args.len()
            )));
        }
        if args.iter().any(String::is_empty) {
            return Err(Error::invalid_argument(format!("{}: empty argument", operation)));
        }

        Ok(Self {
            target,
            operation,
            args,
        })
    }

    /// Returns the result table name, if the line assigns one.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Returns the operation.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the trimmed arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn arity_text(min: usize, max: Option<usize>) -> String {
    match max {
        Some(max) if max == min => min.to_string(),
        Some(max) => format!("{}..={}", min, max),
        None => format!("at least {}", min),
    }
}

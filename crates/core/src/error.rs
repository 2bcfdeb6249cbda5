//! Error types for relq.

use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// Result type alias for relq operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for relq operations.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Attribute name absent from a table header.
    AttributeNotFound {
        attribute: String,
    },
    /// Operator applied to value kinds it cannot combine.
    TypeMismatch {
        op: String,
        left: DataType,
        right: DataType,
    },
    /// Two tables whose headers differ where identical headers are required.
    SchemaMismatch {
        left: String,
        right: String,
    },
    /// Aggregate requested over zero rows.
    EmptyAggregate {
        function: String,
    },
    /// Unrecognized operation name.
    OperationNotFound {
        name: String,
    },
    /// Condition text outside the supported grammar.
    MalformedExpression {
        message: String,
        position: usize,
    },
    /// Table name absent from the catalog.
    TableNotFound {
        name: String,
    },
    /// Operation argument of the wrong shape.
    InvalidArgument {
        message: String,
    },
    /// Table file record whose field count differs from the header.
    MalformedRecord {
        line: usize,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AttributeNotFound { attribute } => {
                write!(f, "Attribute not found: {}", attribute)
            }
            Error::TypeMismatch { op, left, right } => {
                write!(f, "Type mismatch: cannot apply '{}' to {} and {}", op, left, right)
            }
            Error::SchemaMismatch { left, right } => {
                write!(f, "Schema mismatch: [{}] vs [{}]", left, right)
            }
            Error::EmptyAggregate { function } => {
                write!(f, "Cannot compute {} over zero rows", function)
            }
            Error::OperationNotFound { name } => {
                write!(f, "Operation not found: {}", name)
            }
            Error::MalformedExpression { message, position } => {
                write!(f, "Malformed expression at {}: {}", position, message)
            }
            Error::TableNotFound { name } => {
                write!(f, "Table not found: {}", name)
            }
            Error::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
            Error::MalformedRecord { line, expected, got } => {
                write!(
                    f,
                    "Malformed record on line {}: expected {} fields, got {}",
                    line, expected, got
                )
            }
        }
    }
}

impl Error {
    /// Creates an attribute not found error.
    pub fn attribute_not_found(attribute: impl Into<String>) -> Self {
        Error::AttributeNotFound {
            attribute: attribute.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(op: impl Into<String>, left: DataType, right: DataType) -> Self {
        Error::TypeMismatch {
            op: op.into(),
            left,
            right,
        }
    }

    /// Creates a schema mismatch error.
    pub fn schema_mismatch(left: impl Into<String>, right: impl Into<String>) -> Self {
        Error::SchemaMismatch {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Creates an empty aggregate error.
    pub fn empty_aggregate(function: impl Into<String>) -> Self {
        Error::EmptyAggregate {
            function: function.into(),
        }
    }

    /// Creates an operation not found error.
    pub fn operation_not_found(name: impl Into<String>) -> Self {
        Error::OperationNotFound { name: name.into() }
    }

    /// Creates a malformed expression error.
    pub fn malformed_expression(message: impl Into<String>, position: usize) -> Self {
        Error::MalformedExpression {
            message: message.into(),
            position,
        }
    }

    /// Creates a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Error::TableNotFound { name: name.into() }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a malformed record error.
    pub fn malformed_record(line: usize, expected: usize, got: usize) -> Self {
        Error::MalformedRecord {
            line,
            expected,
            got,
        }
    }
}

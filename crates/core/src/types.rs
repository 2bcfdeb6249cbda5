//! Data type definitions for relq.
//!
//! This module defines the kinds of values a table cell can hold.

use core::fmt;

/// Kinds of values stored in a relq table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point number, produced by arithmetic and averages
    Float,
    /// UTF-8 text
    Text,
}

impl DataType {
    /// Returns whether values of this type take part in arithmetic.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }

    /// Returns whether values of this type can be compared with values of `other`.
    pub fn is_comparable_with(&self, other: DataType) -> bool {
        *self == other || (self.is_numeric() && other.is_numeric())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => write!(f, "integer"),
            DataType::Float => write!(f, "float"),
            DataType::Text => write!(f, "text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_data_type_equality() {
        assert_eq!(DataType::Integer, DataType::Integer);
        assert_ne!(DataType::Integer, DataType::Float);
    }

    #[test]
    fn test_numeric() {
        assert!(DataType::Integer.is_numeric());
        assert!(DataType::Float.is_numeric());
        assert!(!DataType::Text.is_numeric());
    }

    #[test]
    fn test_comparable() {
        assert!(DataType::Integer.is_comparable_with(DataType::Float));
        assert!(DataType::Text.is_comparable_with(DataType::Text));
        assert!(!DataType::Text.is_comparable_with(DataType::Integer));
    }

    #[test]
    fn test_display() {
        assert_eq!(DataType::Text.to_string(), "text");
    }
}

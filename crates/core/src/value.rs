//! Value type definitions for relq.
//!
//! This module defines the `Value` enum which represents any value that can be stored
//! in a table cell, along with the comparison and coercion rules the query engine
//! relies on.

use crate::types::DataType;
use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A value that can be stored in a table cell.
#[derive(Clone, Debug)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// UTF-8 text
    Str(String),
}

impl Value {
    /// Returns the data type of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int(_) => DataType::Integer,
            Value::Float(_) => DataType::Float,
            Value::Str(_) => DataType::Text,
        }
    }

    /// Parses a table-file field: all-digit fields become integers, anything else
    /// stays text. Digit runs that overflow `i64` stay text.
    pub fn parse_field(field: &str) -> Self {
        if !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(v) = field.parse::<i64>() {
                return Value::Int(v);
            }
        }
        Value::Str(field.to_string())
    }

    /// Returns the i64 value if this is an Int, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the f64 value if this is a Float, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a Str, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Coerces a numeric value to f64. Text has no numeric reading.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Str(_) => None,
        }
    }

    /// Returns true for Int and Float values.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.data_type().is_numeric()
    }

    /// Compares two values the way a relational operator does.
    ///
    /// Integers and floats compare numerically with each other; text compares with
    /// text. Any other pairing has no ordering and yields `None`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let a = a.to_f64()?;
                let b = b.to_f64()?;
                a.partial_cmp(&b)
            }
            _ => None,
        }
    }

    /// Returns the canonical form used as an index key.
    ///
    /// Floats holding an exact integer collapse to `Int`, so a key computed by
    /// arithmetic (`qty / 2 = 30` looks up `60.0`) finds rows stored as integers.
    pub fn to_index_key(&self) -> Value {
        match self {
            Value::Float(f) if is_integral(*f) => Value::Int(*f as i64),
            other => other.clone(),
        }
    }

    /// Returns a type ordering value for comparing different kinds.
    fn type_order(&self) -> u8 {
        match self {
            Value::Int(_) => 0,
            Value::Float(_) => 1,
            Value::Str(_) => 2,
        }
    }
}

/// Returns true when `f` holds an integer that fits in `i64`.
#[inline]
fn is_integral(f: f64) -> bool {
    f >= i64::MIN as f64 && f < i64::MAX as f64 && (f as i64) as f64 == f
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Int(i) => i.hash(state),
            // 0.0 and -0.0 are equal, so they must hash alike
            Value::Float(f) if *f == 0.0 => 0u64.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order used by sorting and ordered indexes.
///
/// Numbers order numerically across Int and Float (ties broken Int before Float so
/// the order stays consistent with `Eq`), NaN sorts above every number, and all
/// numbers sort before text.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            },
            (Value::Int(a), Value::Float(b)) => {
                if b.is_nan() {
                    Ordering::Less
                } else {
                    (*a as f64)
                        .partial_cmp(b)
                        .unwrap_or(Ordering::Equal)
                        .then(Ordering::Less)
                }
            }
            (Value::Float(a), Value::Int(b)) => {
                if a.is_nan() {
                    Ordering::Greater
                } else {
                    a.partial_cmp(&(*b as f64))
                        .unwrap_or(Ordering::Equal)
                        .then(Ordering::Greater)
                }
            }
            // Different kinds: order by type discriminant
            _ => self.type_order().cmp(&other.type_order()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) if is_integral(*v) => write!(f, "{:.1}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

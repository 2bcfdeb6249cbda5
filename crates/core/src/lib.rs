//! relq Core - value, record and header types for the relq query engine.
//!
//! This crate provides the foundational types shared by every other relq crate:
//!
//! - `DataType`: The kinds of values a cell can hold (Integer, Float, Text)
//! - `Value`: Runtime cell values with native equality and ordering
//! - `Record`: A positionally aligned sequence of values
//! - `Header`: The ordered attribute names of a table
//! - `Error`: Error types shared by the engine
//!
//! # Example
//!
//! ```rust
//! use relq_core::{Header, Record, Value};
//!
//! let header = Header::from_names(["id", "name"]);
//! let record = Record::new(vec![Value::Int(1), Value::from("Alice")]);
//!
//! assert_eq!(header.position("name").unwrap(), 1);
//! assert_eq!(record.get(1), Some(&Value::from("Alice")));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod header;
mod record;
mod types;
mod value;

pub use error::{Error, Result};
pub use header::Header;
pub use record::{Record, RowPos};
pub use types::DataType;
pub use value::Value;

//! relq Storage - Table storage for the relq query engine.
//!
//! This crate provides:
//!
//! - `Table`: A header, its rows, and at most one index of each kind
//! - `codec`: The pipe-delimited text format tables are loaded from and saved to
//!
//! # Example
//!
//! ```rust
//! use relq_core::Value;
//! use relq_storage::{codec, IndexKind};
//!
//! let mut table = codec::parse_table("id|name\n1|a\n2|b\n1|c\n").unwrap();
//! table.build_hash_index("id").unwrap();
//!
//! assert_eq!(table.index_kind_on("id"), Some(IndexKind::Hash));
//! assert_eq!(table.lookup_hash(&Value::Int(1)), &[0, 2]);
//! assert_eq!(codec::render_table(&table), "id|name\n1|a\n2|b\n1|c\n");
//! ```

#![no_std]

extern crate alloc;

pub mod codec;
mod table;

pub use table::{AttributeIndex, IndexKind, Table};

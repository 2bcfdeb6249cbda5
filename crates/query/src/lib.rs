//! relq Query - Condition compiler, index planner and relational operators.
//!
//! This crate provides:
//!
//! - `ast`: Condition AST definitions
//! - `parser`: Lexer and parser turning condition text into the AST
//! - `eval`: Binding of conditions to table headers and their evaluation
//! - `planner`: Index hints for selections and joins
//! - `executor`: Relational operators (select, join, project, aggregate, window, sort, concat)
//!
//! # Example
//!
//! ```rust
//! use relq_query::executor::select_where;
//! use relq_storage::codec::parse_table;
//!
//! let mut sales = parse_table("saleid|qty\n1|60\n2|30\n3|30\n").unwrap();
//! sales.build_hash_index("qty").unwrap();
//!
//! // `qty / 2 = 15` looks up key 30 in the index.
//! let result = select_where(&sales, "qty / 2 = 15").unwrap();
//! assert_eq!(result.len(), 2);
//! ```

#![no_std]

extern crate alloc;

pub mod ast;
pub mod eval;
pub mod executor;
pub mod parser;
pub mod planner;

pub use eval::{compile_join, compile_select, CompiledCondition};
pub use parser::parse_condition;
pub use planner::{plan_join, plan_select, IndexHint, JoinHint};

//! relq Index - Index implementations for the relq query engine.
//!
//! This crate provides the two index kinds a table can carry:
//!
//! - `HashIndex`: O(1) point lookups using a hash map
//! - `OrderedIndex`: Point lookups over keys kept in sorted order
//!
//! Both map a key to the positions of the rows holding it, in row order.
//!
//! # Example
//!
//! ```rust
//! use relq_index::{HashIndex, Index, OrderedIndex};
//!
//! let mut ordered: OrderedIndex<i64> = OrderedIndex::new();
//! ordered.add(10, 0);
//! ordered.add(20, 1);
//! ordered.add(10, 2);
//! assert_eq!(ordered.get(&10), &[0, 2]);
//!
//! let mut hash: HashIndex<i64> = HashIndex::new();
//! hash.add(10, 0);
//! hash.add(10, 3);
//! assert_eq!(hash.get(&10), &[0, 3]);
//! assert!(hash.get(&11).is_empty());
//! ```

#![no_std]

extern crate alloc;

pub mod hash;
pub mod ordered;
pub mod traits;

pub use hash::HashIndex;
pub use ordered::OrderedIndex;
pub use traits::Index;

//! Query executor module.

mod aggregate;
mod concat;
pub mod join;
mod project;
mod runner;
mod select;
mod sort;
mod window;

pub use aggregate::{avg, count, sum, AggregateFunc, GroupAggregateExecutor};
pub use concat::concat;
pub use join::{index_join, join_header, nested_loop_join, JoinExecutor};
pub use project::ProjectExecutor;
pub use runner::{join_where, select_where};
pub use select::{select, select_and, select_or, SelectExecutor};
pub use sort::SortExecutor;
pub use window::{WindowExecutor, WindowFunc};

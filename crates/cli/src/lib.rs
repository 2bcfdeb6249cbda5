//! relq CLI - runs query files against the relq engine.
//!
//! A query file holds one operation per line:
//!
//! ```text
//! R := inputfromfile(sales1)
//! Hash(R, itemid)
//! R1 := select(R, (itemid = 14) and (qty > 10))
//! T := sumgroup(R1, qty, time)
//! outputtofile(T, report)
//! ```
//!
//! [`Session`] parses each line with [`QueryLine`], resolves table names through its
//! [`Catalog`], and runs the matching operator from `relq-query`.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod io;
pub mod report;
pub mod session;

pub use catalog::Catalog;
pub use config::RelqConfig;
pub use dispatch::{Operation, QueryLine};
pub use error::{CliError, Result};
pub use session::{Outcome, RunSummary, Session};

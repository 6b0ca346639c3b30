//! SQLite-backed history log for `wmt`.
//!
//! [`SqliteHistory`] keeps timestamped key/value entries in a single
//! `history` table. Each operation is one SQL statement executed on the
//! [`tokio_rusqlite`] connection thread; storage errors are returned as
//! [`Error::Database`] and never retried.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteHistory;

#[cfg(test)]
mod tests;

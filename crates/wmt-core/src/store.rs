//! The `HistoryStore` trait.
//!
//! Implemented by storage backends (e.g. `wmt-store-sqlite`). CLI commands and
//! other features depend on this abstraction, not on a concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{entry::Entry, history::HistoryConfig};

/// Append-only, timestamped key/value log.
///
/// Every storage error is returned to the caller as-is; backends neither retry
/// nor buffer.
pub trait HistoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Whether [`add`](Self::add) currently persists anything.
  fn is_enabled(&self) -> bool;

  /// Replace the configuration snapshot the store was opened with.
  fn reconfigure(&self, config: HistoryConfig);

  /// Record `value` for `key` at the current UTC instant.
  ///
  /// Returns the written entry, or `None` without touching storage when
  /// history is disabled.
  fn add<'a>(
    &'a self,
    key: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<Option<Entry>, Self::Error>> + Send + 'a;

  /// The `n` most recent entries for `key`, newest first.
  ///
  /// Available whether or not recording is enabled.
  fn get_last<'a>(
    &'a self,
    key: &'a str,
    n: usize,
  ) -> impl Future<Output = Result<Vec<Entry>, Self::Error>> + Send + 'a;

  /// Delete every entry strictly older than `cutoff` and return how many
  /// were removed.
  fn purge(
    &self,
    cutoff: DateTime<Utc>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}

//! Entry — one immutable record in the history log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single `(timestamp, key, value)` record.
///
/// Entries are append-only: they are created once by
/// [`HistoryStore::add`](crate::store::HistoryStore::add) and only ever
/// removed in bulk by [`HistoryStore::purge`](crate::store::HistoryStore::purge).
/// Several entries may share a key, and even an identical timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
  pub timestamp: DateTime<Utc>,
  pub key:       String,
  pub value:     String,
}

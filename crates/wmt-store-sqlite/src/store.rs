//! [`SqliteHistory`] — the SQLite implementation of [`HistoryStore`].

use std::{
  path::Path,
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
};

use chrono::{DateTime, Utc};
use wmt_core::{entry::Entry, history::HistoryConfig, store::HistoryStore};

use crate::{
  encode::{RawEntry, encode_ts},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The history log backed by a single SQLite file.
///
/// Cloning is cheap; clones share the connection and the enabled flag.
#[derive(Clone)]
pub struct SqliteHistory {
  conn:    tokio_rusqlite::Connection,
  enabled: Arc<AtomicBool>,
}

impl SqliteHistory {
  /// Open (or create) the log at `path` and make sure the table exists.
  pub async fn open(path: impl AsRef<Path>, config: HistoryConfig) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn, config).await
  }

  /// Open an in-memory log — useful for testing.
  pub async fn open_in_memory(config: HistoryConfig) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn, config).await
  }

  async fn init(conn: tokio_rusqlite::Connection, config: HistoryConfig) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;

    Ok(Self {
      conn,
      enabled: Arc::new(AtomicBool::new(config.enabled)),
    })
  }

  /// Insert a row with a caller-chosen timestamp.
  #[cfg(test)]
  pub(crate) async fn insert_at(
    &self,
    ts: DateTime<Utc>,
    key: &str,
    value: &str,
  ) -> Result<()> {
    self.insert(encode_ts(ts), key.to_owned(), value.to_owned()).await
  }

  /// Remove the backing table so later statements fail.
  #[cfg(test)]
  pub(crate) async fn drop_table(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch("DROP TABLE history")?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert(&self, ts: String, key: String, value: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO history (ts, key, value) VALUES (?1, ?2, ?3)",
          rusqlite::params![ts, key, value],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── HistoryStore impl ───────────────────────────────────────────────────────

impl HistoryStore for SqliteHistory {
  type Error = Error;

  fn is_enabled(&self) -> bool { self.enabled.load(Ordering::Relaxed) }

  fn reconfigure(&self, config: HistoryConfig) {
    let was = self.enabled.swap(config.enabled, Ordering::Relaxed);
    if was != config.enabled {
      tracing::info!(enabled = config.enabled, "history recording reconfigured");
    }
  }

  async fn add<'a>(&'a self, key: &'a str, value: &'a str) -> Result<Option<Entry>> {
    if !self.is_enabled() {
      tracing::trace!(key, "history disabled, not recording");
      return Ok(None);
    }

    let entry = Entry {
      timestamp: Utc::now(),
      key:       key.to_owned(),
      value:     value.to_owned(),
    };

    self
      .insert(encode_ts(entry.timestamp), entry.key.clone(), entry.value.clone())
      .await?;

    tracing::debug!(key, ts = %entry.timestamp, "recorded history entry");
    Ok(Some(entry))
  }

  async fn get_last<'a>(&'a self, key: &'a str, n: usize) -> Result<Vec<Entry>> {
    if n == 0 {
      return Ok(Vec::new());
    }

    let key_str = key.to_owned();
    // SQLite treats a negative LIMIT as "no limit".
    let limit = i64::try_from(n).unwrap_or(i64::MAX);

    let raws: Vec<RawEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT ts, key, value FROM history
           WHERE key = ?1
           ORDER BY ts DESC
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![key_str, limit], |row| {
            Ok(RawEntry {
              ts:    row.get(0)?,
              key:   row.get(1)?,
              value: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    tracing::debug!(key, n, returned = raws.len(), "read history");
    raws.into_iter().map(RawEntry::into_entry).collect()
  }

  async fn purge(&self, cutoff: DateTime<Utc>) -> Result<usize> {
    let cutoff_str = encode_ts(cutoff);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM history WHERE ts < ?1",
          rusqlite::params![cutoff_str],
        )?)
      })
      .await?;

    tracing::debug!(%cutoff, removed, "purged history");
    Ok(removed)
  }
}

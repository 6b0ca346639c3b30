//! Integration tests for `SqliteHistory` against in-memory and on-disk
//! databases.

use chrono::{DateTime, Duration, TimeZone, Utc};
use wmt_core::{history::HistoryConfig, store::HistoryStore};

use crate::{Error, SqliteHistory};

const ENABLED: HistoryConfig = HistoryConfig { enabled: true };
const DISABLED: HistoryConfig = HistoryConfig { enabled: false };

async fn store() -> SqliteHistory {
  SqliteHistory::open_in_memory(ENABLED)
    .await
    .expect("in-memory store")
}

fn at(secs: i64) -> DateTime<Utc> { Utc.timestamp_opt(secs, 0).unwrap() }

fn values(entries: &[wmt_core::entry::Entry]) -> Vec<&str> {
  entries.iter().map(|e| e.value.as_str()).collect()
}

// ─── Add ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_then_get_last_returns_entry() {
  let s = store().await;

  let before = Utc::now();
  let written = s.add("theme", "dark").await.unwrap().unwrap();
  let after = Utc::now();

  let last = s.get_last("theme", 1).await.unwrap();
  assert_eq!(last, vec![written.clone()]);
  assert_eq!(written.key, "theme");
  assert_eq!(written.value, "dark");
  assert!(before <= written.timestamp && written.timestamp <= after);
}

#[tokio::test]
async fn later_add_comes_first() {
  let s = store().await;
  let t1 = s.add("theme", "dark").await.unwrap().unwrap();
  let t2 = s.add("theme", "light").await.unwrap().unwrap();
  assert!(t2.timestamp >= t1.timestamp);

  let last = s.get_last("theme", 10).await.unwrap();
  assert_eq!(last, vec![t2, t1]);
}

#[tokio::test]
async fn disabled_add_is_a_silent_noop() {
  let s = SqliteHistory::open_in_memory(DISABLED).await.unwrap();
  assert!(!s.is_enabled());

  let written = s.add("x", "1").await.unwrap();
  assert!(written.is_none());
  assert!(s.get_last("x", 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_and_odd_strings_are_stored_verbatim() {
  let s = store().await;
  s.add("", "").await.unwrap();
  s.add("ключ 🔑", "line one\nline two").await.unwrap();

  assert_eq!(values(&s.get_last("", 5).await.unwrap()), [""]);
  assert_eq!(
    values(&s.get_last("ключ 🔑", 5).await.unwrap()),
    ["line one\nline two"]
  );
}

#[tokio::test]
async fn duplicate_rows_are_kept() {
  let s = store().await;
  s.insert_at(at(100), "k", "v").await.unwrap();
  s.insert_at(at(100), "k", "v").await.unwrap();

  assert_eq!(s.get_last("k", 10).await.unwrap().len(), 2);
}

// ─── Reconfigure ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reconfigure_toggles_recording() {
  let s = store().await;
  s.reconfigure(DISABLED);
  assert!(s.add("k", "off").await.unwrap().is_none());

  s.reconfigure(ENABLED);
  assert!(s.add("k", "on").await.unwrap().is_some());

  assert_eq!(values(&s.get_last("k", 10).await.unwrap()), ["on"]);
}

#[tokio::test]
async fn clones_share_the_enabled_flag() {
  let s = store().await;
  let other = s.clone();
  other.reconfigure(DISABLED);
  assert!(!s.is_enabled());
}

// ─── GetLast ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_last_orders_newest_first_and_limits() {
  let s = store().await;
  s.insert_at(at(200), "k", "b").await.unwrap();
  s.insert_at(at(100), "k", "a").await.unwrap();
  s.insert_at(at(300), "k", "c").await.unwrap();

  let all = s.get_last("k", 10).await.unwrap();
  assert_eq!(values(&all), ["c", "b", "a"]);
  assert!(all.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

  assert_eq!(values(&s.get_last("k", 2).await.unwrap()), ["c", "b"]);
}

#[tokio::test]
async fn get_last_orders_across_second_boundaries() {
  let s = store().await;
  let early = Utc.timestamp_opt(1_000, 999_999_999).unwrap();
  let late = Utc.timestamp_opt(1_001, 0).unwrap();
  s.insert_at(late, "k", "late").await.unwrap();
  s.insert_at(early, "k", "early").await.unwrap();

  assert_eq!(values(&s.get_last("k", 2).await.unwrap()), ["late", "early"]);
}

#[tokio::test]
async fn get_last_zero_is_empty() {
  let s = store().await;
  s.add("k", "v").await.unwrap();
  assert!(s.get_last("k", 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn get_last_huge_n_returns_everything() {
  let s = store().await;
  s.add("k", "v").await.unwrap();
  assert_eq!(s.get_last("k", usize::MAX).await.unwrap().len(), 1);
}

#[tokio::test]
async fn get_last_matches_key_exactly() {
  let s = store().await;
  s.add("Theme", "upper").await.unwrap();
  s.add("theme", "lower").await.unwrap();
  s.add("theme2", "other").await.unwrap();

  assert_eq!(values(&s.get_last("theme", 10).await.unwrap()), ["lower"]);
  assert!(s.get_last("missing", 10).await.unwrap().is_empty());
}

// ─── Purge ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn purge_removes_strictly_older_entries() {
  let s = store().await;
  s.insert_at(at(100), "theme", "dark").await.unwrap();
  s.insert_at(at(200), "theme", "light").await.unwrap();
  s.insert_at(at(300), "theme", "solarized").await.unwrap();

  let removed = s.purge(at(200)).await.unwrap();
  assert_eq!(removed, 1);
  assert_eq!(
    values(&s.get_last("theme", 10).await.unwrap()),
    ["solarized", "light"]
  );
}

#[tokio::test]
async fn purge_is_idempotent() {
  let s = store().await;
  s.insert_at(at(100), "k", "old").await.unwrap();
  s.insert_at(at(200), "k", "new").await.unwrap();

  assert_eq!(s.purge(at(150)).await.unwrap(), 1);
  assert_eq!(s.purge(at(150)).await.unwrap(), 0);
  assert_eq!(s.purge(at(50)).await.unwrap(), 0);
  assert_eq!(values(&s.get_last("k", 10).await.unwrap()), ["new"]);
}

#[tokio::test]
async fn purge_spans_all_keys() {
  let s = store().await;
  s.insert_at(at(100), "a", "1").await.unwrap();
  s.insert_at(at(100), "b", "2").await.unwrap();

  assert_eq!(s.purge(at(101)).await.unwrap(), 2);
  assert!(s.get_last("a", 1).await.unwrap().is_empty());
  assert!(s.get_last("b", 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn purge_at_added_timestamp_keeps_that_entry() {
  let s = store().await;
  s.insert_at(Utc::now() - Duration::days(1), "theme", "dark")
    .await
    .unwrap();
  let t2 = s.add("theme", "light").await.unwrap().unwrap();

  s.purge(t2.timestamp).await.unwrap();
  assert_eq!(s.get_last("theme", 10).await.unwrap(), vec![t2]);
}

#[tokio::test]
async fn purge_works_while_disabled() {
  let s = store().await;
  s.insert_at(at(100), "k", "v").await.unwrap();
  s.reconfigure(DISABLED);
  assert_eq!(s.purge(at(200)).await.unwrap(), 1);
}

// ─── Storage failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn storage_errors_reach_the_caller() {
  let s = store().await;
  s.add("k", "v").await.unwrap();
  s.drop_table().await.unwrap();

  assert!(matches!(s.add("k", "v").await, Err(Error::Database(_))));
  assert!(matches!(s.get_last("k", 1).await, Err(Error::Database(_))));
  assert!(matches!(s.purge(at(100)).await, Err(Error::Database(_))));
}

#[tokio::test]
async fn disabled_add_skips_storage_entirely() {
  let s = store().await;
  s.drop_table().await.unwrap();
  s.reconfigure(DISABLED);

  assert!(s.add("k", "v").await.unwrap().is_none());
}

// ─── On-disk ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopen_keeps_history_and_reads_while_disabled() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("wmt.db");

  {
    let s = SqliteHistory::open(&path, ENABLED).await.unwrap();
    s.add("theme", "dark").await.unwrap();
  }

  let s = SqliteHistory::open(&path, DISABLED).await.unwrap();
  s.add("theme", "ignored").await.unwrap();
  assert_eq!(values(&s.get_last("theme", 10).await.unwrap()), ["dark"]);
}

#[tokio::test]
async fn open_fails_for_unusable_path() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("missing").join("wmt.db");
  assert!(SqliteHistory::open(&path, ENABLED).await.is_err());
}

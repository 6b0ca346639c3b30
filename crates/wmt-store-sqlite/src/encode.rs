//! Conversions between domain types and the text stored in SQLite columns.
//!
//! Timestamps are written as `YYYY-MM-DDTHH:MM:SS.fffffffffZ`. Every value has
//! the same width, so SQLite's text comparison orders them chronologically and
//! `ORDER BY ts` / `ts < ?` need no date functions.

use chrono::{DateTime, SecondsFormat, Utc};
use wmt_core::entry::Entry;

use crate::{Error, Result};

pub fn encode_ts(ts: DateTime<Utc>) -> String {
  ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_ts(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// Raw strings read directly from a `history` row.
pub struct RawEntry {
  pub ts:    String,
  pub key:   String,
  pub value: String,
}

impl RawEntry {
  pub fn into_entry(self) -> Result<Entry> {
    Ok(Entry {
      timestamp: decode_ts(&self.ts)?,
      key:       self.key,
      value:     self.value,
    })
  }
}

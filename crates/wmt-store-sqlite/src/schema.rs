//! SQL schema for the history table.
//!
//! Executed every time a connection is opened; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`.

pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Append/delete log. Rows are never updated and carry no primary key:
-- duplicate (ts, key, value) rows are legitimate.
CREATE TABLE IF NOT EXISTS history (
    ts    TEXT NOT NULL,   -- fixed-width RFC 3339 UTC, nanosecond precision
    key   TEXT NOT NULL,
    value TEXT NOT NULL
);
";

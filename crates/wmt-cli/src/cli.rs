//! Command-line arguments.

use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};
use clap::{ArgGroup, Parser, Subcommand};

use crate::settings::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(name = "wmt", version, about = "A collection of web dev utilities.")]
pub struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH, global = true)]
  pub config: PathBuf,

  /// Path to the history database; overrides `db_path` from the config file.
  #[arg(long, value_name = "PATH", global = true)]
  pub db: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Print version.
  Version,

  /// Record, show and prune the key/value history.
  #[command(subcommand)]
  History(HistoryCommand),

  /// Inspect effective settings.
  #[command(subcommand)]
  Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
  /// Record VALUE for KEY (silently skipped when `history = no`).
  Add { key: String, value: String },

  /// Show the most recent entries for KEY, newest first.
  Show {
    key: String,

    /// Maximum number of entries.
    #[arg(short = 'n', long, default_value_t = 10)]
    limit: usize,

    /// Emit one JSON object per line.
    #[arg(long)]
    json: bool,
  },

  /// Delete entries recorded before a cutoff.
  #[command(group(ArgGroup::new("cutoff").required(true).args(["before", "older_than"])))]
  Purge {
    /// RFC 3339 instant; entries strictly older are removed.
    #[arg(long, value_name = "TIME", value_parser = parse_instant)]
    before: Option<DateTime<Utc>>,

    /// Age such as `30d`, `12h`, `2w`; measured back from now.
    #[arg(long, value_name = "AGE", value_parser = parse_age)]
    older_than: Option<TimeDelta>,
  },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
  /// List every setting with its effective value.
  List,
  /// Print the effective value of one setting.
  Get { key: String },
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| format!("expected an RFC 3339 time: {e}"))
}

/// Parse `<count><unit>` where unit is one of `s`, `m`, `h`, `d`, `w`.
pub fn parse_age(s: &str) -> Result<TimeDelta, String> {
  let s = s.trim();
  let split = s
    .find(|c: char| !c.is_ascii_digit())
    .ok_or_else(|| format!("missing unit in {s:?} (use s, m, h, d or w)"))?;
  let (count, unit) = s.split_at(split);
  let count: i64 = count
    .parse()
    .map_err(|_| format!("missing count in {s:?}"))?;

  let delta = match unit {
    "s" => TimeDelta::try_seconds(count),
    "m" => TimeDelta::try_minutes(count),
    "h" => TimeDelta::try_hours(count),
    "d" => TimeDelta::try_days(count),
    "w" => TimeDelta::try_weeks(count),
    other => return Err(format!("unknown unit {other:?} (use s, m, h, d or w)")),
  };
  delta.ok_or_else(|| format!("age {s:?} is out of range"))
}

//! Subcommand handlers.

use anyhow::{Context as _, Result, bail};
use chrono::{SecondsFormat, Utc};
use wmt_core::{entry::Entry, settings::Settings, store::HistoryStore};

use crate::cli::{ConfigCommand, HistoryCommand};

pub fn version_line() -> String {
  format!(
    "wmt version {} {}/{}",
    env!("CARGO_PKG_VERSION"),
    std::env::consts::OS,
    std::env::consts::ARCH,
  )
}

// ─── history ─────────────────────────────────────────────────────────────────

pub async fn history<S>(store: &S, cmd: HistoryCommand) -> Result<()>
where
  S: HistoryStore,
{
  match cmd {
    HistoryCommand::Add { key, value } => {
      let written = store
        .add(&key, &value)
        .await
        .context("history add")?;
      if written.is_none() {
        tracing::info!(key = %key, "history is disabled; nothing recorded");
      }
    }
    HistoryCommand::Show { key, limit, json } => {
      let entries = store
        .get_last(&key, limit)
        .await
        .context("history show")?;
      print!("{}", render_entries(&entries, json)?);
    }
    HistoryCommand::Purge { before, older_than } => {
      let cutoff = match (before, older_than) {
        (Some(at), _) => at,
        (None, Some(age)) => Utc::now()
          .checked_sub_signed(age)
          .context("purge age reaches before the representable range")?,
        (None, None) => bail!("either --before or --older-than is required"),
      };
      let removed = store.purge(cutoff).await.context("history purge")?;
      println!(
        "removed {removed} entries older than {}",
        cutoff.to_rfc3339_opts(SecondsFormat::Secs, true)
      );
    }
  }
  Ok(())
}

fn render_entries(entries: &[Entry], json: bool) -> Result<String> {
  let mut out = String::new();
  for entry in entries {
    if json {
      out.push_str(&serde_json::to_string(entry)?);
    } else {
      out.push_str(&entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true));
      out.push_str("  ");
      out.push_str(&entry.value);
    }
    out.push('\n');
  }
  Ok(out)
}

// ─── config ──────────────────────────────────────────────────────────────────

pub fn config(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
  match cmd {
    ConfigCommand::List => {
      for (spec, value) in settings.iter() {
        println!("{} = {value}  ({})", spec.key, spec.allowed.join("|"));
      }
    }
    ConfigCommand::Get { key } => println!("{}", settings.get(&key)?),
  }
  Ok(())
}

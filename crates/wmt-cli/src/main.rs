//! `wmt` — a collection of web dev utilities.
//!
//! # Usage
//!
//! ```
//! wmt history add theme dark
//! wmt history show theme -n 5
//! wmt history purge --older-than 30d
//! WMT_HISTORY=no wmt history add theme light   # not recorded
//! ```

mod cli;
mod commands;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use cli::{Cli, Command};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wmt_core::history::HistoryConfig;
use wmt_store_sqlite::SqliteHistory;

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so command output stays pipeable.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  match cli.command {
    Command::Version => {
      println!("{}", commands::version_line());
      Ok(())
    }
    Command::Config(cmd) => {
      let loaded = settings::load(&cli.config)?;
      commands::config(&loaded.settings, cmd)
    }
    Command::History(cmd) => {
      let loaded = settings::load(&cli.config)?;
      let store = open_history(cli.db, &loaded).await?;
      commands::history(&store, cmd).await
    }
  }
}

/// Open the history database, creating its directory and table if needed.
async fn open_history(
  db_override: Option<PathBuf>,
  loaded: &settings::Loaded,
) -> Result<SqliteHistory> {
  let config = HistoryConfig::from_settings(&loaded.settings)
    .context("reading history setting")?;

  let db_path = db_override
    .or_else(|| loaded.db_path.clone())
    .unwrap_or_else(|| PathBuf::from(settings::DEFAULT_DB_PATH));
  let db_path = settings::expand_tilde(&db_path);

  if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let store = SqliteHistory::open(&db_path, config)
    .await
    .with_context(|| format!("failed to open history at {}", db_path.display()))?;

  tracing::debug!(path = %db_path.display(), enabled = config.enabled, "history opened");
  Ok(store)
}

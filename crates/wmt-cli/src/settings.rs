//! Loading the configuration file and environment into the settings registry.

use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use serde::Deserialize;
use wmt_core::{history, settings::Settings};

pub const DEFAULT_CONFIG_PATH: &str = "~/.wmt/config.toml";
pub const DEFAULT_DB_PATH: &str = "~/.wmt/wmt.db";

/// Shape of the config file. Every key except `db_path` is offered to the
/// settings registry, whatever its type.
#[derive(Deserialize, Default, Debug)]
struct RawConfig {
  #[serde(default)]
  db_path:  Option<PathBuf>,
  #[serde(flatten)]
  settings: BTreeMap<String, config::Value>,
}

/// Settings validated against their declarations, plus the database path.
#[derive(Debug)]
pub struct Loaded {
  pub settings: Settings,
  pub db_path:  Option<PathBuf>,
}

/// Every setting the binary knows about.
pub fn registry() -> Settings {
  let mut settings = Settings::new();
  history::register(&mut settings);
  settings
}

/// Read `path` (if it exists) and `WMT_*` environment variables.
pub fn load(path: &Path) -> Result<Loaded> {
  let path = expand_tilde(path);

  let raw: RawConfig = config::Config::builder()
    .add_source(config::File::from(path.clone()).required(false))
    .add_source(config::Environment::with_prefix("WMT"))
    .build()
    .with_context(|| format!("failed to read config {}", path.display()))?
    .try_deserialize()
    .context("failed to deserialise config")?;

  from_raw(raw)
}

fn from_raw(raw: RawConfig) -> Result<Loaded> {
  let mut settings = registry();
  // Non-string values are rendered as text: unknown keys get skipped by the
  // registry and registered ones fail validation.
  let values = raw
    .settings
    .into_iter()
    .map(|(key, value)| (key, value.to_string()));
  settings.load(values).context("invalid configuration")?;
  Ok(Loaded { settings, db_path: raw.db_path })
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

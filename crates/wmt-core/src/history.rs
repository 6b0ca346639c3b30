//! The `history` setting and the configuration snapshot handed to stores.

use crate::{Result, settings::{SettingSpec, Settings}};

/// `history = yes | no`, enabled unless configured otherwise.
pub const SETTING: SettingSpec = SettingSpec {
  key:     "history",
  allowed: &["yes", "no"],
  default: "yes",
};

/// Declare the `history` setting. Must run before settings are loaded.
pub fn register(settings: &mut Settings) { settings.register(SETTING); }

/// Immutable view of the history configuration, read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
  pub enabled: bool,
}

impl Default for HistoryConfig {
  fn default() -> Self { Self { enabled: true } }
}

impl HistoryConfig {
  pub fn from_settings(settings: &Settings) -> Result<Self> {
    Ok(Self { enabled: settings.get(SETTING.key)? == "yes" })
  }
}

//! Settings registry — validated, string-valued configuration.
//!
//! Features declare the keys they read with a [`SettingSpec`] (allowed values
//! plus a default) through [`Settings::register`]. Raw values coming from the
//! config file or environment are then checked against those declarations by
//! [`Settings::load`].

use std::collections::BTreeMap;

use crate::{Error, Result};

/// Declaration of a single setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSpec {
  pub key:     &'static str,
  pub allowed: &'static [&'static str],
  pub default: &'static str,
}

impl SettingSpec {
  pub fn permits(&self, value: &str) -> bool { self.allowed.contains(&value) }

  fn check(&self, value: &str) -> Result<()> {
    if self.permits(value) {
      Ok(())
    } else {
      Err(Error::InvalidValue {
        key:     self.key.to_owned(),
        value:   value.to_owned(),
        allowed: self.allowed.join(", "),
      })
    }
  }
}

/// Registered setting declarations together with their loaded values.
#[derive(Debug, Clone, Default)]
pub struct Settings {
  specs:  BTreeMap<&'static str, SettingSpec>,
  values: BTreeMap<&'static str, String>,
}

impl Settings {
  pub fn new() -> Self { Self::default() }

  /// Declare a setting. Re-registering a key replaces its declaration and
  /// drops any value loaded for it.
  pub fn register(&mut self, spec: SettingSpec) {
    self.values.remove(spec.key);
    self.specs.insert(spec.key, spec);
  }

  pub fn spec(&self, key: &str) -> Option<&SettingSpec> { self.specs.get(key) }

  /// Load raw `key -> value` pairs. Values for registered keys must be in the
  /// declared allowed set; unregistered keys are skipped.
  pub fn load<I, K, V>(&mut self, raw: I) -> Result<()>
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
  {
    for (key, value) in raw {
      let key = key.as_ref();
      let Some(spec) = self.specs.get(key).copied() else {
        tracing::warn!(key, "ignoring unknown setting");
        continue;
      };
      let value = value.into();
      spec.check(&value)?;
      self.values.insert(spec.key, value);
    }
    Ok(())
  }

  /// Override a single registered setting.
  pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
    let spec = *self
      .specs
      .get(key)
      .ok_or_else(|| Error::UnknownSetting(key.to_owned()))?;
    let value = value.into();
    spec.check(&value)?;
    self.values.insert(spec.key, value);
    Ok(())
  }

  /// The effective value of `key`: the loaded value, else the default.
  pub fn get(&self, key: &str) -> Result<&str> {
    let spec = self
      .specs
      .get(key)
      .ok_or_else(|| Error::UnknownSetting(key.to_owned()))?;
    Ok(
      self
        .values
        .get(key)
        .map(String::as_str)
        .unwrap_or(spec.default),
    )
  }

  /// Every registered setting with its effective value, ordered by key.
  pub fn iter(&self) -> impl Iterator<Item = (&SettingSpec, &str)> + '_ {
    self.specs.values().map(|spec| {
      let value = self
        .values
        .get(spec.key)
        .map(String::as_str)
        .unwrap_or(spec.default);
      (spec, value)
    })
  }
}

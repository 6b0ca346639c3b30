//! Error types for `wmt-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown setting: {0:?}")]
  UnknownSetting(String),

  #[error("invalid value {value:?} for setting {key:?} (allowed: {allowed})")]
  InvalidValue {
    key:     String,
    value:   String,
    allowed: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

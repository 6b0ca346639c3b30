//! Core types and trait definitions for `wmt`.
//!
//! This crate is free of database and CLI dependencies. It defines the
//! history [`Entry`](entry::Entry), the [`HistoryStore`](store::HistoryStore)
//! trait implemented by storage backends, and the settings registry that
//! backends and features register their configuration keys with.

#![allow(async_fn_in_trait)]

pub mod entry;
pub mod error;
pub mod history;
pub mod settings;
pub mod store;

pub use error::{Error, Result};

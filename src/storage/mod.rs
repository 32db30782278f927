//! # Storage Layer
//!
//! Persistence and configuration for the todo tool.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Entries | Tab-delimited rows `project\tkey\tdescription` | `$TODOFILE` or `<data dir>/todo.txt` |
//! | Config | TOML | `$TODO_CONFIG` or `<config dir>/config.toml` |
//!
//! ## Write Safety
//!
//! - [`TodoFile`] takes an `fs2` lock while reading or writing
//! - Saves are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`TodoFile`] - Load/save a [`Store`](crate::domain::Store)
//! - [`Config`] - Resolved user configuration

mod config;
mod tsv;

pub use config::{Config, ConfigError, FileConfig};
pub use tsv::TodoFile;

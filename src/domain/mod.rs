//! Domain models for the todo tool
//!
//! Contains the command parser and the ordered-entry store, without any
//! I/O concerns.

mod command;
mod entry;
mod store;

pub use command::{parse_command, Action, Command};
pub use entry::Entry;
pub use store::{safe_index, Direction, Edge, Project, Store, TodoError};

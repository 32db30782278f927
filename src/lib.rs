//! Todo CLI - ordered per-project to-do lists
//!
//! Projects hold ordered entries kept in a tab-delimited file. Commands are
//! free-form token lists: the parser works out which token is the action,
//! which is the project and which are the entry text or indices.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Action, Command, Entry, Project, Store, TodoError};

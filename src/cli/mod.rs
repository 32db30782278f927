//! # Command-Line Interface
//!
//! User-facing entry points and output formatting.
//!
//! ## Modes
//!
//! | Mode | Invocation | Errors |
//! |------|------------|--------|
//! | One-shot | `todo [TOKENS...]` | Reported, exit status 1 |
//! | Interactive | `todo -i` | Reported, loop continues |
//!
//! ## Output Formats
//!
//! `--format text` (default) prints human-readable lists; `--format json`
//! prints one JSON document per command.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` for debug output, including the parsed command:
//! ```bash
//! todo --verbose work up 2
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod dispatch;
mod output;
mod repl;

pub use app::{run, Cli};
pub use dispatch::{execute, run_once};
pub use output::{Output, OutputFormat};

//! Main CLI application structure

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};

use super::output::{Output, OutputFormat};
use super::{dispatch, repl};
use crate::storage::{Config, TodoFile};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Ordered per-project to-do lists")]
#[command(disable_help_flag = true)]
#[command(after_help = "\
Tokens are free-form. Examples:
  todo                      list projects with entry counts
  todo work                 list entries of 'work'
  todo +home buy milk       add an entry to 'home' (created if missing)
  todo -home 2              remove entry #2 from 'home'
  todo work up 3            move entry #3 one step up (also: down, top, bottom)
  todo work up 3 1          move entry #3 to position 1")]
pub struct Cli {
    /// Read commands from a prompt until `q` or end of input (also `-i`)
    #[arg(long)]
    pub interactive: bool,

    /// Todo file to use (overrides $TODOFILE and the config file)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Command tokens: project names, action keywords, indices and text
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

/// Short form of `--interactive`
const INTERACTIVE_TOKEN: &str = "-i";

impl Cli {
    /// Returns true for `--interactive` or a bare `-i` token
    ///
    /// `-i` is matched as a whole token so prefixed project names such as
    /// `-ideas` or `-ii` still reach the parser.
    pub fn is_interactive(&self) -> bool {
        self.interactive || self.tokens.iter().any(|t| t == INTERACTIVE_TOKEN)
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let interactive = cli.is_interactive();

    let mut config = Config::load()?;
    if let Some(file) = cli.file {
        config.file = file;
    }
    if cli.no_color {
        config.color = false;
    }

    let output = Output::new(cli.format, cli.verbose, config.color);
    output.verbose_ctx("config", &format!("Todo file: {}", config.file.display()));
    output.verbose_ctx("config", &format!("Editor: {}", config.editor));

    let file = TodoFile::new(&config.file);

    if interactive {
        if cli.tokens.iter().any(|t| t != INTERACTIVE_TOKEN) {
            output.verbose_ctx("interactive", "Ignoring command tokens");
        }
        repl::run(io::stdin().lock(), &file, &output)?;
    } else {
        dispatch::run_once(&file, &cli.tokens, &output)?;
    }

    output.verbose("Command completed successfully");
    Ok(())
}

//! Configuration handling
//!
//! Settings come from, in increasing precedence: built-in defaults, the
//! user config file (`~/.config/todo-cli/config.toml`, or `$TODO_CONFIG`),
//! environment variables, and command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Default todo file name
const TODO_FILE_NAME: &str = "todo.txt";

/// Default editor when neither config nor `$EDITOR` names one
const DEFAULT_EDITOR: &str = "nano";

/// Contents of the user config file
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    /// Path of the todo file
    pub file: Option<PathBuf>,

    /// Editor command
    pub editor: Option<String>,

    /// Colored output
    pub color: Option<bool>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the todo file
    pub file: PathBuf,

    /// Preferred editor
    pub editor: String,

    /// Whether to color errors and headers
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
            editor: DEFAULT_EDITOR.to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Loads configuration from the config file and the process environment
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::config_path() {
            if let Some(file) = Self::read_file(&path)? {
                config.apply_file(file);
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Returns the user config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "todo", "todo-cli").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the config file path, honoring `$TODO_CONFIG`
    pub fn config_path() -> Option<PathBuf> {
        std::env::var_os("TODO_CONFIG")
            .map(PathBuf::from)
            .or_else(|| Self::config_dir().map(|dir| dir.join("config.toml")))
    }

    /// Default todo file location in the user data directory
    fn default_file() -> PathBuf {
        ProjectDirs::from("dev", "todo", "todo-cli")
            .map(|dirs| dirs.data_dir().join(TODO_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(TODO_FILE_NAME))
    }

    /// Reads a config file, returning `None` when it does not exist
    pub fn read_file(path: &Path) -> Result<Option<FileConfig>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let parsed = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok(Some(parsed))
    }

    /// Overlays values from the config file
    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(path) = file.file {
            self.file = path;
        }
        if let Some(editor) = file.editor {
            self.editor = editor;
        }
        if let Some(color) = file.color {
            self.color = color;
        }
    }

    /// Overlays `$TODOFILE`, `$EDITOR` and `$NO_COLOR`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("TODOFILE").filter(|v| !v.is_empty()) {
            self.file = PathBuf::from(path);
        }
        if let Some(editor) = lookup("EDITOR").filter(|v| !v.is_empty()) {
            self.editor = editor;
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.color = false;
        }
    }
}

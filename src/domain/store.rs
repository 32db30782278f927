//! Project store
//!
//! Holds every project and its ordered entries in memory. Positions shown
//! to the user are 1-based; everything inside the store is 0-based.

use std::num::IntErrorKind;

use thiserror::Error;

use super::entry::Entry;

/// User-facing errors raised by store operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoError {
    #[error("{}", describe_missing_project(.0))]
    NoSuchProject(String),

    #[error("Project '{project}' does not have entry #{index}.")]
    NoSuchEntry { project: String, index: String },

    #[error("'{0}' is not a valid index.")]
    BadIndex(String),

    #[error("{0}")]
    BadSyntax(String),
}

fn describe_missing_project(name: &str) -> String {
    if name.is_empty() {
        "No project specified.".to_string()
    } else {
        format!("Project '{}' does not exist.", name)
    }
}

const MISSING_INDEX: &str = "Entry index missing.";

/// Destination override for a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    #[default]
    None,
    Top,
    Bottom,
}

/// Direction of a single-step move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Raise,
    Lower,
}

/// A named, ordered list of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub entries: Vec<Entry>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries paired with their 1-based display index
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.entries.iter().enumerate().map(|(i, e)| (i + 1, e))
    }
}

/// Canonical digits of an integer token, as `int()` would print it
fn normalize_integer(token: &str) -> String {
    let (sign, digits) = match token.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", token.strip_prefix('+').unwrap_or(token)),
    };
    match digits.trim_start_matches('0') {
        "" => "0".to_string(),
        digits => format!("{}{}", sign, digits),
    }
}

/// Converts a 1-based index token into a checked 0-based position
pub fn safe_index(token: &str, project: &str, len: usize) -> Result<usize, TodoError> {
    let out_of_range = |index: String| TodoError::NoSuchEntry {
        project: project.to_string(),
        index,
    };

    let one_based: i64 = match token.parse::<i64>() {
        Ok(value) => value,
        // Still an integer, just past any possible entry
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(out_of_range(normalize_integer(token)));
        }
        Err(_) => return Err(TodoError::BadIndex(token.to_string())),
    };

    match one_based.checked_sub(1) {
        Some(position) if position >= 0 && (position as u64) < len as u64 => Ok(position as usize),
        _ => Err(out_of_range(one_based.to_string())),
    }
}

/// In-memory mapping from project name to its entries
///
/// Projects keep the order they were loaded in (sorted by name). Projects
/// created afterwards are appended, and emptied projects stay until the
/// next load.
#[derive(Debug, Clone, Default)]
pub struct Store {
    projects: Vec<Project>,
    dirty: bool,
}

impl Store {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from loaded projects, sorting them by name
    pub fn from_projects(mut projects: Vec<Project>) -> Self {
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            projects,
            dirty: false,
        }
    }

    /// Returns all projects in store order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Returns the known project names in store order
    pub fn project_names(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.name.as_str()).collect()
    }

    /// Returns true if a project with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.projects.iter().any(|p| p.name == name)
    }

    /// Looks up a project by name
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    fn position(&self, name: &str) -> Result<usize, TodoError> {
        self.projects
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| TodoError::NoSuchProject(name.to_string()))
    }

    /// Returns true if a mutation happened since load or the last save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag after a successful save
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Projects selected by `filter`, or all projects when there is none
    ///
    /// Unknown names are dropped; selection follows the filter order and
    /// each project appears at most once.
    fn select(&self, filter: Option<&[String]>) -> Vec<&Project> {
        match filter {
            None => self.projects.iter().collect(),
            Some(names) => {
                let mut selected: Vec<&Project> = Vec::new();
                for name in names {
                    if let Some(project) = self.project(name) {
                        if !selected.iter().any(|p| p.name == project.name) {
                            selected.push(project);
                        }
                    }
                }
                selected
            }
        }
    }

    /// Project names with their entry counts
    pub fn list_summary(&self, filter: Option<&[String]>) -> Vec<(&str, usize)> {
        self.select(filter)
            .into_iter()
            .map(|p| (p.name.as_str(), p.len()))
            .collect()
    }

    /// Projects with their full ordered entry lists
    pub fn list_detail(&self, filter: Option<&[String]>) -> Vec<&Project> {
        self.select(filter)
    }

    /// Appends a new entry, creating the project if needed
    pub fn add<S: AsRef<str>>(&mut self, project: &str, description: &[S]) -> Entry {
        let description = description
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        let entry = Entry::new(project, description);

        let slot = match self.position(project) {
            Ok(slot) => slot,
            Err(_) => {
                self.projects.push(Project::new(project));
                self.projects.len() - 1
            }
        };
        self.projects[slot].entries.push(entry.clone());

        self.dirty = true;
        entry
    }

    /// Removes and returns the entry at the 1-based `index` token
    pub fn remove(&mut self, project: &str, index: Option<&str>) -> Result<Entry, TodoError> {
        let index = index.ok_or_else(|| TodoError::BadSyntax(MISSING_INDEX.to_string()))?;
        let slot = self.position(project)?;
        let target = &mut self.projects[slot];
        let position = safe_index(index, project, target.len())?;

        let entry = target.entries.remove(position);
        self.dirty = true;
        Ok(entry)
    }

    /// Moves one entry and returns the project's entries afterwards
    ///
    /// The destination is, in priority order: the explicit `to` token, the
    /// requested edge, or one step in `direction`. It is resolved against
    /// the list before removal and applied to the list after removal.
    pub fn move_entry(
        &mut self,
        project: &str,
        from: Option<&str>,
        to: Option<&str>,
        edge: Edge,
        direction: Direction,
    ) -> Result<&[Entry], TodoError> {
        let from = from.ok_or_else(|| TodoError::BadSyntax(MISSING_INDEX.to_string()))?;
        let slot = self.position(project)?;
        let target = &mut self.projects[slot];
        let len = target.len();
        let source = safe_index(from, project, len)?;
        let last = len - 1;

        let destination = match (to, edge, direction) {
            (Some(to), _, _) => safe_index(to, project, len)?,
            (None, Edge::Top, _) => 0,
            (None, Edge::Bottom, _) => last,
            (None, Edge::None, Direction::Raise) => source.saturating_sub(1),
            (None, Edge::None, Direction::Lower) => (source + 1).min(last),
        };

        let entry = target.entries.remove(source);
        target.entries.insert(destination, entry);

        self.dirty = true;
        Ok(&self.projects[slot].entries)
    }
}

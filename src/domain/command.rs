//! Command parsing
//!
//! Turns a loose token stream into a [`Command`]. There are no flags: each
//! token is classified as an action keyword, a project name or free text
//! depending on what it looks like and on the projects currently known.
//!
//! Classification rules, checked in order for every token:
//!
//! 1. `+name` / `-name` sets both action (add/remove) and project. The last
//!    such token wins.
//! 2. An action keyword, if no action has been set yet.
//! 3. A known project name, if no project has been set yet.
//! 4. Anything else is a free-text argument.
//!
//! With no action the command lists: `ll` when a project was named, `l`
//! otherwise. A bare `+` without a project takes its project from the first
//! argument, so `+ home buy milk` behaves like `+home buy milk`.

use std::fmt;

/// The verb a command resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ListSummary,
    ListDetail,
    Add,
    Remove,
    Raise,
    Lower,
    Top,
    Bottom,
}

/// Keyword table, case-sensitive
const KEYWORDS: &[(&str, Action)] = &[
    ("l", Action::ListSummary),
    ("ll", Action::ListDetail),
    ("a", Action::Add),
    ("add", Action::Add),
    ("+", Action::Add),
    ("r", Action::Remove),
    ("rm", Action::Remove),
    ("del", Action::Remove),
    ("-", Action::Remove),
    ("u", Action::Raise),
    ("up", Action::Raise),
    ("d", Action::Lower),
    ("down", Action::Lower),
    ("t", Action::Top),
    ("top", Action::Top),
    ("b", Action::Bottom),
    ("bot", Action::Bottom),
    ("bottom", Action::Bottom),
];

/// Keyword that hands its project slot to the first argument
const ADD_SHORTHAND: &str = "+";

impl Action {
    /// Looks up an exact keyword
    pub fn from_keyword(token: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == token)
            .map(|(_, action)| *action)
    }

    /// Returns the display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ListSummary => "list-summary",
            Action::ListDetail => "list-detail",
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Raise => "raise",
            Action::Lower => "lower",
            Action::Top => "top",
            Action::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub action: Action,

    /// Target project, empty when none was given
    pub project: String,

    /// Free-text arguments in input order
    pub args: Vec<String>,
}

impl Command {
    /// Returns the project, or `None` when it is empty
    pub fn project(&self) -> Option<&str> {
        if self.project.is_empty() {
            None
        } else {
            Some(&self.project)
        }
    }

    /// Returns the nth free-text argument
    pub fn arg(&self, n: usize) -> Option<&str> {
        self.args.get(n).map(String::as_str)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.action, self.project, self.args.join(" "))
    }
}

/// Splits `+name` / `-name` into its action and project
fn split_prefixed(token: &str) -> Option<(&'static str, Action, &str)> {
    if token.chars().count() < 2 {
        return None;
    }

    if let Some(project) = token.strip_prefix('+') {
        Some(("+", Action::Add, project))
    } else if let Some(project) = token.strip_prefix('-') {
        Some(("-", Action::Remove, project))
    } else {
        None
    }
}

/// Parses `tokens` against the set of currently known project names
pub fn parse_command<S: AsRef<str>>(tokens: &[S], known_projects: &[&str]) -> Command {
    let mut keyword: Option<&str> = None;
    let mut action: Option<Action> = None;
    let mut project = String::new();
    let mut args = Vec::new();

    for token in tokens {
        let token = token.as_ref();

        if let Some((prefix, prefixed_action, name)) = split_prefixed(token) {
            keyword = Some(prefix);
            action = Some(prefixed_action);
            project = name.to_string();
        } else if let (None, Some(found)) = (action, Action::from_keyword(token)) {
            keyword = Some(token);
            action = Some(found);
        } else if project.is_empty() && known_projects.iter().any(|known| *known == token) {
            project = token.to_string();
        } else {
            args.push(token.to_string());
        }
    }

    let action = match action {
        Some(action) => action,
        None if project.is_empty() => Action::ListSummary,
        None => Action::ListDetail,
    };

    if keyword == Some(ADD_SHORTHAND) && project.is_empty() && !args.is_empty() {
        project = args.remove(0);
    }

    Command {
        action,
        project,
        args,
    }
}

//! Command dispatch
//!
//! Routes a parsed [`Command`] to the matching [`Store`] operation and
//! renders the result.

use anyhow::Result;
use serde_json::json;

use super::output::Output;
use crate::domain::{parse_command, Action, Command, Direction, Edge, Entry, Project, Store, TodoError};
use crate::storage::TodoFile;

/// Loads the store, runs one command and saves if anything changed
pub fn run_once<S: AsRef<str>>(file: &TodoFile, tokens: &[S], output: &Output) -> Result<()> {
    let mut store = file.load()?;
    output.verbose_ctx(
        "load",
        &format!("{} project(s) from {}", store.projects().len(), file.path().display()),
    );

    let names = store.project_names();
    let cmd = parse_command(tokens, &names);
    output.verbose_ctx("parse", &cmd.to_string());

    execute(&cmd, &mut store, output)?;

    if store.is_dirty() {
        file.save(&store)?;
        store.mark_saved();
        output.verbose_ctx("save", &format!("Wrote {}", file.path().display()));
    }

    Ok(())
}

/// Executes a command against the store
pub fn execute(cmd: &Command, store: &mut Store, output: &Output) -> Result<(), TodoError> {
    match cmd.action {
        Action::ListSummary => {
            list_summary(cmd, store, output);
            Ok(())
        }
        Action::ListDetail => {
            list_detail(cmd, store, output);
            Ok(())
        }
        Action::Add => add(cmd, store, output),
        Action::Remove => remove(cmd, store, output),
        Action::Raise => move_entry(cmd, store, output, Edge::None, Direction::Raise),
        Action::Lower => move_entry(cmd, store, output, Edge::None, Direction::Lower),
        Action::Top => move_entry(cmd, store, output, Edge::Top, Direction::Raise),
        Action::Bottom => move_entry(cmd, store, output, Edge::Bottom, Direction::Lower),
    }
}

/// Listing filter: the named project plus any further arguments
fn list_filter(cmd: &Command) -> Option<Vec<String>> {
    cmd.project().map(|project| {
        std::iter::once(project.to_string())
            .chain(cmd.args.iter().cloned())
            .collect()
    })
}

fn entry_json(index: usize, entry: &Entry) -> serde_json::Value {
    json!({
        "index": index,
        "key": entry.key,
        "description": entry.description,
    })
}

fn project_json(project: &Project) -> serde_json::Value {
    json!({
        "project": project.name,
        "entries": project
            .numbered()
            .map(|(i, e)| entry_json(i, e))
            .collect::<Vec<_>>(),
    })
}

fn show_project(project: &Project, output: &Output) {
    output.header(&project.name);
    for (index, entry) in project.numbered() {
        output.line(&format!("  {}. {}", index, entry.description));
    }
    output.blank();
}

fn list_summary(cmd: &Command, store: &Store, output: &Output) {
    let filter = list_filter(cmd);
    let summary = store.list_summary(filter.as_deref());

    if output.is_json() {
        let items: Vec<_> = summary
            .iter()
            .map(|(name, count)| json!({ "project": name, "count": count }))
            .collect();
        output.data(&items);
    } else {
        for (name, count) in summary {
            output.line(&format!("{} ({})", name, count));
        }
    }
}

fn list_detail(cmd: &Command, store: &Store, output: &Output) {
    let filter = list_filter(cmd);
    let projects = store.list_detail(filter.as_deref());

    if output.is_json() {
        let items: Vec<_> = projects.iter().map(|p| project_json(p)).collect();
        output.data(&items);
    } else {
        for project in projects {
            show_project(project, output);
        }
    }
}

fn add(cmd: &Command, store: &mut Store, output: &Output) -> Result<(), TodoError> {
    let project = cmd
        .project()
        .ok_or_else(|| TodoError::NoSuchProject(String::new()))?;

    let created = !store.contains(project);
    let entry = store.add(project, &cmd.args);
    if created {
        output.verbose_ctx("add", &format!("Created project {}", project));
    }

    let index = store.project(project).map_or(0, Project::len);
    if output.is_json() {
        output.data(&json!({
            "success": true,
            "project": project,
            "entry": entry_json(index, &entry),
        }));
    } else {
        output.success(&format!("Added to project {}: {}", project, entry.description));
    }

    Ok(())
}

fn remove(cmd: &Command, store: &mut Store, output: &Output) -> Result<(), TodoError> {
    let entry = store.remove(&cmd.project, cmd.arg(0))?;

    if output.is_json() {
        output.data(&json!({
            "success": true,
            "project": cmd.project,
            "entry": entry,
        }));
    } else {
        output.line(&format!("Removed from project {}:", cmd.project));
        output.line(&format!("  {}", entry.description));
    }

    Ok(())
}

fn move_entry(
    cmd: &Command,
    store: &mut Store,
    output: &Output,
    edge: Edge,
    direction: Direction,
) -> Result<(), TodoError> {
    store.move_entry(&cmd.project, cmd.arg(0), cmd.arg(1), edge, direction)?;

    if let Some(project) = store.project(&cmd.project) {
        if output.is_json() {
            output.data(&vec![project_json(project)]);
        } else {
            show_project(project, output);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Json, false, false)
    }

    fn run(store: &mut Store, line: &str) -> Result<(), TodoError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let names = store.project_names();
        let cmd = parse_command(&tokens, &names);
        execute(&cmd, store, &quiet())
    }

    fn descriptions(store: &Store, project: &str) -> Vec<String> {
        store
            .project(project)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.description.clone())
            .collect()
    }

    #[test]
    fn add_to_empty_store() {
        let mut store = Store::new();
        run(&mut store, "+home buy milk").unwrap();

        assert_eq!(descriptions(&store, "home"), vec!["buy milk"]);
        assert!(store.is_dirty());
    }

    #[test]
    fn add_without_project_fails() {
        let mut store = Store::new();
        let err = run(&mut store, "a buy milk").unwrap_err();

        assert_eq!(err, TodoError::NoSuchProject(String::new()));
        assert!(!store.is_dirty());
    }

    #[test]
    fn listing_does_not_dirty() {
        let mut store = Store::new();
        store.add("work", &["a"]);
        store.mark_saved();

        run(&mut store, "").unwrap();
        run(&mut store, "work").unwrap();
        run(&mut store, "ll work garden").unwrap();
        assert!(!store.is_dirty());
    }

    #[test]
    fn keyword_aliases_route_to_moves() {
        let mut store = Store::new();
        for item in ["a", "b", "c"] {
            store.add("work", &[item]);
        }

        run(&mut store, "work t 3").unwrap();
        assert_eq!(descriptions(&store, "work"), vec!["c", "a", "b"]);

        run(&mut store, "bot work 1").unwrap();
        assert_eq!(descriptions(&store, "work"), vec!["a", "b", "c"]);

        run(&mut store, "work down 1").unwrap();
        assert_eq!(descriptions(&store, "work"), vec!["b", "a", "c"]);

        run(&mut store, "up work 3 1").unwrap();
        assert_eq!(descriptions(&store, "work"), vec!["c", "b", "a"]);
    }

    #[test]
    fn r_keyword_removes() {
        let mut store = Store::new();
        store.add("work", &["a"]);
        store.add("work", &["b"]);

        run(&mut store, "r work 1").unwrap();
        assert_eq!(descriptions(&store, "work"), vec!["b"]);
    }

    #[test]
    fn move_without_project() {
        let mut store = Store::new();
        store.add("work", &["a"]);

        let err = run(&mut store, "up 1").unwrap_err();
        assert_eq!(err.to_string(), "No project specified.");
    }

    #[test]
    fn move_without_index() {
        let mut store = Store::new();
        store.add("work", &["a"]);

        let err = run(&mut store, "up work").unwrap_err();
        assert_eq!(err.to_string(), "Entry index missing.");
    }

    #[test]
    fn run_once_saves_only_when_dirty() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        run_once(&file, &["l"], &quiet()).unwrap();
        assert!(!file.path().exists());

        run_once(&file, &["+home", "buy", "milk"], &quiet()).unwrap();
        let store = file.load().unwrap();
        assert_eq!(descriptions(&store, "home"), vec!["buy milk"]);
    }

    #[test]
    fn run_once_reports_store_errors() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        let err = run_once(&file, &["-home", "1"], &quiet()).unwrap_err();
        let todo_err = err.downcast_ref::<TodoError>().unwrap();
        assert_eq!(todo_err, &TodoError::NoSuchProject("home".to_string()));
        assert!(!file.path().exists());
    }
}

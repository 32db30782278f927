//! Tab-delimited storage for entries
//!
//! One row per entry: `project\tkey\tdescription`, no header. Rows of the
//! same project keep their file order. Tabs inside a description are not
//! escaped.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use fs2::FileExt;

use crate::domain::{Entry, Project, Store};

/// Store for entries in a flat tab-delimited file
pub struct TodoFile {
    path: PathBuf,
}

impl TodoFile {
    /// Creates a todo file handle for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every project, sorted by name
    ///
    /// A missing file yields an empty store.
    pub fn load(&self) -> Result<Store> {
        if !self.path.exists() {
            return Ok(Store::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open todo file: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on todo file")?;

        let reader = BufReader::new(&file);
        let mut projects: Vec<Project> = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry = parse_row(&line)
                .with_context(|| format!("Malformed row at line {}", line_num + 1))?;

            // Projects in first-seen order, rows in file order
            match projects.iter_mut().find(|p| p.name == entry.project) {
                Some(project) => project.entries.push(entry),
                None => {
                    let mut project = Project::new(entry.project.clone());
                    project.entries.push(entry);
                    projects.push(project);
                }
            }
        }

        // Lock is released when file is dropped
        Ok(Store::from_projects(projects))
    }

    /// Writes every project in store order (full rewrite)
    pub fn save(&self, store: &Store) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Acquire exclusive lock
            file.lock_exclusive()
                .context("Failed to acquire write lock on todo file")?;

            let mut writer = BufWriter::new(&file);

            for project in store.projects() {
                for entry in &project.entries {
                    writeln!(writer, "{}\t{}\t{}", project.name, entry.key, entry.description)
                        .context("Failed to write entry")?;
                }
            }

            writer.flush().context("Failed to flush todo file")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn parse_row(line: &str) -> Result<Entry> {
    let mut columns = line.splitn(3, '\t');

    match (columns.next(), columns.next(), columns.next()) {
        (Some(project), Some(key), Some(description)) => {
            Ok(Entry::with_key(project, key, description))
        }
        _ => bail!("expected 3 tab-separated columns, got: {:?}", line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

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
    fn load_missing_file() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        let store = file.load().unwrap();
        assert!(store.projects().is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn load_sorts_projects_and_keeps_row_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(
            &path,
            "work\t1\twrite spec\nhome\t2\tbuy milk\nwork\t3\treview PR\n",
        )
        .unwrap();

        let store = TodoFile::new(&path).load().unwrap();
        assert_eq!(store.project_names(), vec!["home", "work"]);
        assert_eq!(descriptions(&store, "work"), vec!["write spec", "review PR"]);
        assert_eq!(store.project("home").unwrap().entries[0].key, "2");
    }

    #[test]
    fn load_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(&path, "\nwork\t1\ta\n\n").unwrap();

        let store = TodoFile::new(&path).load().unwrap();
        assert_eq!(store.list_summary(None), vec![("work", 1)]);
    }

    #[test]
    fn load_rejects_short_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(&path, "work\t1\ta\nbroken row\n").unwrap();

        let err = TodoFile::new(&path).load().unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        let mut store = Store::new();
        store.add("work", &["write", "spec"]);
        store.add("home", &["buy", "milk"]);
        store.add("work", &["review", "PR"]);
        file.save(&store).unwrap();

        let loaded = file.load().unwrap();
        assert_eq!(loaded.project_names(), vec!["home", "work"]);
        assert_eq!(descriptions(&loaded, "work"), vec!["write spec", "review PR"]);
        assert_eq!(
            loaded.project("work").unwrap().entries,
            store.project("work").unwrap().entries
        );
    }

    #[test]
    fn save_writes_store_order() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        let mut store = Store::new();
        let first = store.add("zeta", &["z"]);
        let second = store.add("alpha", &["a"]);
        file.save(&store).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(
            content,
            format!("zeta\t{}\tz\nalpha\t{}\ta\n", first.key, second.key)
        );
    }

    #[test]
    fn empty_projects_are_not_written() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        let mut store = Store::new();
        store.add("work", &["only"]);
        store.remove("work", Some("1")).unwrap();
        file.save(&store).unwrap();

        assert!(file.load().unwrap().projects().is_empty());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("nested").join("todo.txt"));

        file.save(&Store::new()).unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        let mut store = Store::new();
        store.add("work", &["a"]);
        file.save(&store).unwrap();

        assert!(!dir.path().join("todo.txt.tmp").exists());
    }
}

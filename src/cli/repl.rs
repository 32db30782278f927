//! Interactive mode
//!
//! Reads one command per line. Every line reloads the todo file, runs the
//! command and saves if it changed anything, so edits made to the file
//! between lines are picked up.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use super::dispatch;
use super::output::Output;
use crate::storage::TodoFile;

const PROMPT: &str = "=> ";

/// Returns true for a line that ends the session
fn is_quit(words: &[&str]) -> bool {
    matches!(words.first(), Some(&"q") | Some(&"Q"))
}

/// Runs the read-eval loop until `q` or end of input
pub fn run<R: BufRead>(mut input: R, file: &TodoFile, output: &Output) -> Result<()> {
    let mut line = String::new();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush().context("Failed to flush prompt")?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .context("Failed to read command line")?;
        if read == 0 {
            println!();
            break;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        if is_quit(&words) {
            break;
        }

        if let Err(e) = dispatch::run_once(file, &words, output) {
            output.error(&format!("{:#}", e));
        }
    }

    output.verbose("Leaving interactive mode");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Text, false, false)
    }

    #[test]
    fn quit_words() {
        assert!(is_quit(&["q"]));
        assert!(is_quit(&["Q"]));
        assert!(is_quit(&["q", "later"]));
        assert!(!is_quit(&["quit"]));
        assert!(!is_quit(&["work", "q"]));
    }

    #[test]
    fn runs_lines_until_quit() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));
        let input = Cursor::new("+home buy milk\n\nhome up 1\n-home 5\nq\n+home never\n");

        run(input, &file, &quiet()).unwrap();

        let store = file.load().unwrap();
        assert_eq!(store.list_summary(None), vec![("home", 1)]);
    }

    #[test]
    fn later_lines_see_new_projects() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));
        let input = Cursor::new("+work a\n+work b\nwork bottom 1\n");

        run(input, &file, &quiet()).unwrap();

        let store = file.load().unwrap();
        let entries: Vec<_> = store
            .project("work")
            .unwrap()
            .entries
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(entries, vec!["b", "a"]);
    }
}

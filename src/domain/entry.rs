//! Entry domain model
//!
//! An entry is a single line item inside a project. Its position in the
//! project's list is the only thing that changes after creation.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Length of the hex key written to the todo file
const KEY_LEN: usize = 12;

/// Generates a row key from project, description and creation time
fn generate_key(project: &str, description: &str, timestamp: DateTime<Utc>) -> String {
    let input = format!(
        "{}\t{}\t{}",
        project,
        description,
        timestamp.timestamp_nanos_opt().unwrap_or(0)
    );
    let hash = blake3::hash(input.as_bytes());
    hash.to_hex()[..KEY_LEN].to_string()
}

/// A single to-do line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Name of the owning project
    pub project: String,

    /// Row identifier in the todo file
    pub key: String,

    /// Free-text description
    pub description: String,
}

impl Entry {
    /// Creates an entry with a freshly generated key
    pub fn new(project: impl Into<String>, description: impl Into<String>) -> Self {
        let project = project.into();
        let description = description.into();
        let key = generate_key(&project, &description, Utc::now());

        Self {
            project,
            key,
            description,
        }
    }

    /// Rebuilds an entry read back from storage
    pub fn with_key(
        project: impl Into<String>,
        key: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            key: key.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_gets_hex_key() {
        let entry = Entry::new("home", "buy milk");

        assert_eq!(entry.project, "home");
        assert_eq!(entry.description, "buy milk");
        assert_eq!(entry.key.len(), KEY_LEN);
        assert!(entry.key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn key_depends_on_timestamp() {
        let t1 = Utc::now();
        let t2 = t1 + chrono::Duration::nanoseconds(1);

        assert_ne!(
            generate_key("home", "buy milk", t1),
            generate_key("home", "buy milk", t2)
        );
    }

    #[test]
    fn with_key_keeps_stored_key() {
        let entry = Entry::with_key("work", "8812345", "review PR");
        assert_eq!(entry.key, "8812345");
    }
}

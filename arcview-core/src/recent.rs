//! Recent-documents bookkeeping
//!
//! A bounded, most-recent-first list of documents the user has opened,
//! persisted as a JSON file so it survives restarts. Entries are keyed by
//! document identity: re-opening a document moves its entry to the front
//! rather than adding a duplicate.
//!
//! Persistence is best-effort the same way the original's recent list is:
//! a list that cannot be read starts empty, a list that cannot be written
//! stays in memory, and neither case interrupts opening the document.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many documents the list keeps by default.
pub const DEFAULT_RECENT_CAPACITY: usize = 10;

/// One remembered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    /// Document identity (its file name).
    pub name: String,
    /// Where the document was opened from.
    pub path: PathBuf,
    /// When it was last opened.
    pub opened_at: DateTime<Utc>,
}

/// Bounded most-recent-first list of opened documents.
#[derive(Debug, Clone)]
pub struct RecentDocuments {
    entries: Vec<RecentEntry>,
    capacity: usize,
    backing: Option<PathBuf>,
}

impl RecentDocuments {
    /// Creates an empty in-memory list with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            backing: None,
        }
    }

    /// Loads the list from a JSON file, binding future writes to it.
    ///
    /// A missing file starts an empty list; an unreadable or malformed one
    /// does the same after a warning. Loading never fails.
    #[must_use]
    pub fn load(path: &Path, capacity: usize) -> Self {
        let mut list = Self::new(capacity);
        list.backing = Some(path.to_path_buf());

        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Vec<RecentEntry>>(&json) {
                Ok(mut entries) => {
                    entries.truncate(list.capacity);
                    list.entries = entries;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "recent list malformed; starting empty"
                    );
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "recent list unreadable; starting empty"
                );
            }
        }

        list
    }

    /// Records an open, moving the document to the front of the list.
    ///
    /// An existing entry with the same name is replaced. The list is
    /// truncated to capacity and, when backed by a file, written out;
    /// a failed write is logged and otherwise ignored.
    pub fn record(&mut self, name: &str, path: &Path) {
        self.entries.retain(|entry| entry.name != name);
        self.entries.insert(
            0,
            RecentEntry {
                name: name.to_string(),
                path: path.to_path_buf(),
                opened_at: Utc::now(),
            },
        );
        self.entries.truncate(self.capacity);
        self.persist();
    }

    /// Removes one document from the list by name.
    pub fn remove(&mut self, name: &str) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        if self.entries.len() != before {
            self.persist();
        }
    }

    /// Empties the list.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.persist();
        }
    }

    /// The entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    /// Number of remembered documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn persist(&self) {
        let Some(path) = self.backing.as_ref() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %path.display(), error = %e, "recent list not saved");
                return;
            }
        }
        match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::warn!(path = %path.display(), error = %e, "recent list not saved");
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "recent list not saved");
            }
        }
    }
}

impl Default for RecentDocuments {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}

//! Persistent content store
//!
//! This module provides the second content tier: transformed entry text
//! persisted across sessions so a document's slow-to-format parts open
//! instantly the next time. Keys are scoped by document name, mirroring how
//! the memory tier is scoped by clearing it on document switch.
//!
//! Store failures are never fatal to the caller. The resolver treats a
//! failed read as a miss and a failed write as "the write did not happen".

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// I/O error while reading or writing an entry
    #[error("I/O error: {0}")]
    Io(String),

    /// An entry file exists but cannot be parsed
    #[error("Malformed store entry: {0}")]
    Malformed(String),
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A persisted entry with its scope and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Document the entry belongs to
    pub document: String,
    /// Entry path inside the document
    pub key: String,
    /// When the entry was saved
    pub saved_at: DateTime<Utc>,
    /// Resolved entry text
    pub text: String,
}

/// Asynchronous persistent store for resolved entry text.
///
/// Implementations must tolerate concurrent calls; the resolver issues
/// reads and writes that may complete in any order.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Loads the text stored for an entry, or `None` on a miss.
    async fn load(&self, document: &str, key: &str) -> StoreResult<Option<String>>;

    /// Saves text for an entry, replacing any previous value.
    async fn save(&self, document: &str, key: &str, text: &str) -> StoreResult<()>;

    /// Removes one entry. Removing a missing entry is not an error.
    async fn remove(&self, document: &str, key: &str) -> StoreResult<()>;

    /// Returns the entry keys stored for a document.
    async fn keys(&self, document: &str) -> StoreResult<Vec<String>>;

    /// Removes every entry stored for a document.
    async fn clear_document(&self, document: &str) -> StoreResult<()>;

    /// Returns the documents that have stored entries.
    async fn documents(&self) -> StoreResult<Vec<String>>;
}

/// File-backed store keeping one JSON file per entry.
///
/// Entries live under `<base>/<document>/<key>.json` with both path
/// components escaped so entry paths containing separators or other
/// filesystem-hostile bytes map to flat file names.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory all documents are stored under.
    base: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on the first save.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Returns the directory all documents are stored under.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    fn document_dir(&self, document: &str) -> PathBuf {
        self.base.join(escape_component(document))
    }

    fn entry_path(&self, document: &str, key: &str) -> PathBuf {
        self.document_dir(document)
            .join(format!("{}.json", escape_component(key)))
    }
}

#[async_trait]
impl ContentStore for FileStore {
    async fn load(&self, document: &str, key: &str) -> StoreResult<Option<String>> {
        let path = self.entry_path(document, key);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        let entry: StoredEntry =
            serde_json::from_str(&json).map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(Some(entry.text))
    }

    async fn save(&self, document: &str, key: &str, text: &str) -> StoreResult<()> {
        let dir = self.document_dir(document);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let entry = StoredEntry {
            document: document.to_string(),
            key: key.to_string(),
            saved_at: Utc::now(),
            text: text.to_string(),
        };
        let json =
            serde_json::to_string(&entry).map_err(|e| StoreError::Malformed(e.to_string()))?;

        tokio::fs::write(self.entry_path(document, key), json)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn remove(&self, document: &str, key: &str) -> StoreResult<()> {
        match tokio::fs::remove_file(self.entry_path(document, key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn keys(&self, document: &str) -> StoreResult<Vec<String>> {
        let dir = self.document_dir(document);
        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        let mut keys = Vec::new();
        while let Some(dir_entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            let path = dir_entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            match tokio::fs::read_to_string(&path).await {
                Ok(json) => match serde_json::from_str::<StoredEntry>(&json) {
                    Ok(entry) => keys.push(entry.key),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping malformed store entry");
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable store entry");
                }
            }
        }
        keys.sort_unstable();
        Ok(keys)
    }

    async fn clear_document(&self, document: &str) -> StoreResult<()> {
        match tokio::fs::remove_dir_all(self.document_dir(document)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn documents(&self) -> StoreResult<Vec<String>> {
        let mut read_dir = match tokio::fs::read_dir(&self.base).await {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        let mut documents = Vec::new();
        while let Some(dir_entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            let file_type = dir_entry
                .file_type()
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
            if file_type.is_dir() {
                if let Some(name) = dir_entry.file_name().to_str() {
                    documents.push(unescape_component(name));
                }
            }
        }
        documents.sort_unstable();
        Ok(documents)
    }
}

/// In-memory store for tests and sessions that opt out of persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// document -> key -> text
    entries: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, HashMap<String, String>>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Io("store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn load(&self, document: &str, key: &str) -> StoreResult<Option<String>> {
        let entries = self.locked()?;
        Ok(entries
            .get(document)
            .and_then(|keys| keys.get(key))
            .cloned())
    }

    async fn save(&self, document: &str, key: &str, text: &str) -> StoreResult<()> {
        let mut entries = self.locked()?;
        entries
            .entry(document.to_string())
            .or_default()
            .insert(key.to_string(), text.to_string());
        Ok(())
    }

    async fn remove(&self, document: &str, key: &str) -> StoreResult<()> {
        let mut entries = self.locked()?;
        if let Some(keys) = entries.get_mut(document) {
            keys.remove(key);
        }
        Ok(())
    }

    async fn keys(&self, document: &str) -> StoreResult<Vec<String>> {
        let entries = self.locked()?;
        let mut keys: Vec<String> = entries
            .get(document)
            .map(|keys| keys.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort_unstable();
        Ok(keys)
    }

    async fn clear_document(&self, document: &str) -> StoreResult<()> {
        let mut entries = self.locked()?;
        entries.remove(document);
        Ok(())
    }

    async fn documents(&self) -> StoreResult<Vec<String>> {
        let entries = self.locked()?;
        let mut documents: Vec<String> = entries.keys().cloned().collect();
        documents.sort_unstable();
        Ok(documents)
    }
}

/// Escapes a document name or entry path into a single flat file name
/// component.
///
/// Bytes outside `[A-Za-z0-9._-]` become `%XX`, so distinct inputs always
/// map to distinct names and the mapping reverses exactly. Inputs that
/// would collapse to `.` or `..` are fully escaped instead.
fn escape_component(raw: &str) -> String {
    use std::fmt::Write;

    let escape_all = matches!(raw, "" | "." | "..");
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' if !escape_all => {
                out.push(char::from(byte));
            }
            b'.' if !escape_all => out.push('.'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

/// Reverses [`escape_component`]. Malformed escapes pass through verbatim.
fn unescape_component(escaped: &str) -> String {
    let bytes = escaped.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let Some(hex) = escaped.get(i + 1..i + 3) {
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    out.push(byte);
                    i += 3;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Component Escaping Tests
    // ========================================================================

    #[test]
    fn escape_keeps_safe_characters() {
        assert_eq!(escape_component("document.xml"), "document.xml");
        assert_eq!(escape_component("image-1_v2.png"), "image-1_v2.png");
    }

    #[test]
    fn escape_encodes_separators() {
        assert_eq!(escape_component("word/document.xml"), "word%2Fdocument.xml");
        assert_eq!(escape_component("a b"), "a%20b");
    }

    #[test]
    fn escape_never_yields_dot_components() {
        assert_eq!(escape_component("."), "%2E");
        assert_eq!(escape_component(".."), "%2E%2E");
        assert_ne!(escape_component(""), "");
    }

    #[test]
    fn escape_round_trips() {
        for raw in ["word/document.xml", "a b/c%d", "report.docx", "ümlaut/ö.xml"] {
            assert_eq!(unescape_component(&escape_component(raw)), raw);
        }
    }

    #[test]
    fn distinct_keys_stay_distinct() {
        assert_ne!(escape_component("a/b"), escape_component("a_b"));
        assert_ne!(escape_component("a%2Fb"), escape_component("a/b"));
    }

    // ========================================================================
    // Memory Store Tests
    // ========================================================================

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        store.save("doc1", "word/document.xml", "<w/>").await.unwrap();

        let loaded = store.load("doc1", "word/document.xml").await.unwrap();
        assert_eq!(loaded.as_deref(), Some("<w/>"));
    }

    #[tokio::test]
    async fn memory_store_miss_returns_none() {
        let store = MemoryStore::new();
        assert!(store.load("doc1", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_store_scopes_by_document() {
        let store = MemoryStore::new();
        store.save("doc1", "a.xml", "one").await.unwrap();
        store.save("doc2", "a.xml", "two").await.unwrap();

        assert_eq!(store.load("doc1", "a.xml").await.unwrap().as_deref(), Some("one"));
        assert_eq!(store.load("doc2", "a.xml").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn memory_store_clear_document_is_scoped() {
        let store = MemoryStore::new();
        store.save("doc1", "a.xml", "one").await.unwrap();
        store.save("doc2", "a.xml", "two").await.unwrap();

        store.clear_document("doc1").await.unwrap();

        assert!(store.load("doc1", "a.xml").await.unwrap().is_none());
        assert!(store.load("doc2", "a.xml").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn memory_store_lists_keys_and_documents() {
        let store = MemoryStore::new();
        store.save("doc1", "b.xml", "x").await.unwrap();
        store.save("doc1", "a.xml", "x").await.unwrap();
        store.save("doc2", "c.xml", "x").await.unwrap();

        assert_eq!(store.keys("doc1").await.unwrap(), vec!["a.xml", "b.xml"]);
        assert_eq!(store.documents().await.unwrap(), vec!["doc1", "doc2"]);
    }

    // ========================================================================
    // File Store Tests
    // ========================================================================

    #[tokio::test]
    async fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store
            .save("report.docx", "word/document.xml", "<w:document/>")
            .await
            .unwrap();

        let loaded = store.load("report.docx", "word/document.xml").await.unwrap();
        assert_eq!(loaded.as_deref(), Some("<w:document/>"));
    }

    #[tokio::test]
    async fn file_store_miss_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.load("doc", "nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_store_save_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("doc", "a.xml", "old").await.unwrap();
        store.save("doc", "a.xml", "new").await.unwrap();

        assert_eq!(store.load("doc", "a.xml").await.unwrap().as_deref(), Some("new"));
        assert_eq!(store.keys("doc").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn file_store_keys_recover_original_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("doc", "word/document.xml", "x").await.unwrap();
        store.save("doc", "word/_rels/document.xml.rels", "y").await.unwrap();

        assert_eq!(
            store.keys("doc").await.unwrap(),
            vec!["word/_rels/document.xml.rels", "word/document.xml"]
        );
    }

    #[tokio::test]
    async fn file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("doc", "a.xml", "x").await.unwrap();
        store.remove("doc", "a.xml").await.unwrap();
        store.remove("doc", "a.xml").await.unwrap();

        assert!(store.load("doc", "a.xml").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_store_clear_document_removes_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("doc", "a.xml", "x").await.unwrap();
        store.clear_document("doc").await.unwrap();

        assert!(store.keys("doc").await.unwrap().is_empty());
        assert!(store.documents().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn file_store_lists_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("beta.docx", "a.xml", "x").await.unwrap();
        store.save("alpha.docx", "a.xml", "x").await.unwrap();

        assert_eq!(
            store.documents().await.unwrap(),
            vec!["alpha.docx", "beta.docx"]
        );
    }

    #[tokio::test]
    async fn file_store_skips_malformed_entries_in_listing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save("doc", "a.xml", "x").await.unwrap();
        let stray = dir.path().join("doc").join("stray.json");
        tokio::fs::write(&stray, "not json").await.unwrap();

        assert_eq!(store.keys("doc").await.unwrap(), vec!["a.xml"]);
    }
}

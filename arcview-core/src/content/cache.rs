//! In-memory content cache
//!
//! This module provides the session-lifetime memory tier of the content
//! pipeline. Entries live until the cache is cleared, which happens when a
//! different document is opened.

use std::collections::HashMap;

/// In-memory cache of resolved entry text, keyed by entry path.
///
/// This is the fastest content tier. It holds the final displayable text
/// for an entry, after any transform has run, so repeat opens skip the
/// store, the archive and the worker entirely.
///
/// # Example
///
/// ```
/// use arcview_core::content::MemoryCache;
///
/// let mut cache = MemoryCache::new();
///
/// cache.insert("word/document.xml".to_string(), "<w:document/>".to_string());
/// assert_eq!(cache.get("word/document.xml"), Some("<w:document/>"));
///
/// // Drop everything when a new document opens
/// cache.clear();
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryCache {
    /// Resolved text keyed by entry path.
    entries: HashMap<String, String>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets cached text for an entry path.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if the entry path is cached.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts text for an entry path, replacing any previous value.
    pub fn insert(&mut self, key: String, text: String) {
        self.entries.insert(key, text);
    }

    /// Removes an entry, returning its text if it was cached.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Drops every entry. Called when a different document opens.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all cached entry paths in arbitrary order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

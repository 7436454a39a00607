//! In-memory archive for tests and demos

use super::{ArchiveError, ArchiveReader, ArchiveResult};

/// Archive reader backed by in-memory `(path, bytes)` pairs.
///
/// Entries keep their insertion order, matching how a file-backed archive
/// reports its directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    identity: String,
    entries: Vec<(String, Vec<u8>)>,
}

impl MemoryArchive {
    /// Creates an empty archive with the given document identity.
    #[must_use]
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            entries: Vec::new(),
        }
    }

    /// Adds an entry, builder style.
    #[must_use]
    pub fn with_entry(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let path = path.into();
        let bytes = bytes.into();
        if let Some(existing) = self.entries.iter_mut().find(|(p, _)| *p == path) {
            existing.1 = bytes;
        } else {
            self.entries.push((path, bytes));
        }
    }

    fn find(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, bytes)| bytes.as_slice())
    }
}

impl ArchiveReader for MemoryArchive {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn entries(&self) -> Vec<String> {
        self.entries.iter().map(|(path, _)| path.clone()).collect()
    }

    fn read_text(&mut self, path: &str) -> ArchiveResult<String> {
        self.find(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .ok_or_else(|| ArchiveError::EntryNotFound(path.to_string()))
    }

    fn read_binary(&mut self, path: &str) -> ArchiveResult<Vec<u8>> {
        self.find(path)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| ArchiveError::EntryNotFound(path.to_string()))
    }

    fn entry_size(&mut self, path: &str) -> ArchiveResult<u64> {
        self.find(path)
            .map(|bytes| bytes.len() as u64)
            .ok_or_else(|| ArchiveError::EntryNotFound(path.to_string()))
    }

    fn contains(&self, path: &str) -> bool {
        self.find(path).is_some()
    }
}

//! Archive readers
//!
//! This module defines the raw-source tier of the content pipeline: the
//! [`ArchiveReader`] trait the resolver reads entry bytes through, a
//! zip-backed implementation for real documents, and an in-memory
//! implementation for tests and demos.
//!
//! Entry paths use `/` separators exactly as stored in the archive; they are
//! the content keys the rest of the workbench routes by.

mod memory;
mod zip;

pub use memory::MemoryArchive;
pub use zip::ZipArchiveReader;

use thiserror::Error;

/// Errors that can occur while reading an archive
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    /// The archive file could not be opened or is not a readable archive
    #[error("Failed to open archive: {0}")]
    Open(String),

    /// The requested entry path does not exist in the archive
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// I/O error while reading an entry
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for archive operations
pub type ArchiveResult<T> = std::result::Result<T, ArchiveError>;

/// Raw source of document entries.
///
/// Implementations hand out entry content by path. Text reads decode
/// lossily; archive members are not required to be valid UTF-8 to be
/// viewable.
pub trait ArchiveReader: Send {
    /// Stable identity of the open document, prefixed onto persistent cache
    /// keys. For file-backed archives this is the file name.
    fn identity(&self) -> &str;

    /// Returns all file entry paths, in archive order. Directory entries
    /// are not included.
    fn entries(&self) -> Vec<String>;

    /// Reads an entry as text, decoding lossily.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::EntryNotFound`] for unknown paths.
    fn read_text(&mut self, path: &str) -> ArchiveResult<String>;

    /// Reads an entry's raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::EntryNotFound`] for unknown paths.
    fn read_binary(&mut self, path: &str) -> ArchiveResult<Vec<u8>>;

    /// Returns an entry's uncompressed size in bytes.
    ///
    /// The default reads the entry; implementations with a directory of
    /// sizes should answer from it instead.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::EntryNotFound`] for unknown paths.
    fn entry_size(&mut self, path: &str) -> ArchiveResult<u64> {
        self.read_binary(path).map(|bytes| bytes.len() as u64)
    }

    /// Returns true if the archive contains the entry path.
    fn contains(&self, path: &str) -> bool {
        self.entries().iter().any(|entry| entry == path)
    }
}

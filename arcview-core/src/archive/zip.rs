//! Zip-backed archive reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use super::{ArchiveError, ArchiveReader, ArchiveResult};

/// Reads entries from a zip-based document (`.docx`, `.xlsx`, `.odt`, plain
/// `.zip`, and friends).
///
/// The central directory is read once on open; entry content is read on
/// demand and decompressed per call.
pub struct ZipArchiveReader {
    identity: String,
    archive: ZipArchive<File>,
}

impl ZipArchiveReader {
    /// Opens a document file.
    ///
    /// The document identity is the file name, extension included.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Open`] if the file cannot be opened or is not
    /// a valid zip archive.
    pub fn open(path: impl AsRef<Path>) -> ArchiveResult<Self> {
        let path = path.as_ref();
        let identity = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());

        let file = File::open(path).map_err(|e| ArchiveError::Open(e.to_string()))?;
        let archive = ZipArchive::new(file).map_err(|e| ArchiveError::Open(e.to_string()))?;

        tracing::debug!(document = %identity, entries = archive.len(), "archive opened");
        Ok(Self { identity, archive })
    }

    fn read_entry(&mut self, path: &str) -> ArchiveResult<Vec<u8>> {
        let mut entry = match self.archive.by_name(path) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(ArchiveError::EntryNotFound(path.to_string()));
            }
            Err(e) => return Err(ArchiveError::Io(e.to_string())),
        };

        let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| ArchiveError::Io(e.to_string()))?;
        Ok(bytes)
    }
}

impl ArchiveReader for ZipArchiveReader {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn entries(&self) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(String::from)
            .collect()
    }

    fn read_text(&mut self, path: &str) -> ArchiveResult<String> {
        let bytes = self.read_entry(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_binary(&mut self, path: &str) -> ArchiveResult<Vec<u8>> {
        self.read_entry(path)
    }

    fn entry_size(&mut self, path: &str) -> ArchiveResult<u64> {
        // Size comes from the central directory; nothing is decompressed.
        match self.archive.by_name(path) {
            Ok(entry) => Ok(entry.size()),
            Err(ZipError::FileNotFound) => Err(ArchiveError::EntryNotFound(path.to_string())),
            Err(e) => Err(ArchiveError::Io(e.to_string())),
        }
    }

    fn contains(&self, path: &str) -> bool {
        self.archive.file_names().any(|name| name == path)
    }
}

impl std::fmt::Debug for ZipArchiveReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipArchiveReader")
            .field("identity", &self.identity)
            .field("entries", &self.archive.len())
            .finish()
    }
}

//! CLI error types and exit codes.

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, store, or other non-content errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Content failure - an entry could not be found or resolved
    pub const CONTENT_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document could not be opened or read
    #[error("Document error: {0}")]
    Document(String),

    /// Entry not found in the document
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// Entry content could not be resolved
    #[error("Content error: {0}")]
    Resolve(String),

    /// Persistent store error
    #[error("Store error: {0}")]
    Store(String),

    /// Pane layout error
    #[error("Layout error: {0}")]
    Layout(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<arcview_core::archive::ArchiveError> for CliError {
    fn from(err: arcview_core::archive::ArchiveError) -> Self {
        use arcview_core::archive::ArchiveError;
        match err {
            ArchiveError::EntryNotFound(key) => Self::EntryNotFound(key),
            other => Self::Document(other.to_string()),
        }
    }
}

impl From<arcview_core::content::StoreError> for CliError {
    fn from(err: arcview_core::content::StoreError) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<arcview_core::error::ArcviewError> for CliError {
    fn from(err: arcview_core::error::ArcviewError) -> Self {
        use arcview_core::archive::ArchiveError;
        use arcview_core::content::ContentError;
        use arcview_core::error::ArcviewError;
        match err {
            ArcviewError::Archive(ArchiveError::EntryNotFound(key))
            | ArcviewError::Content(ContentError::Archive(ArchiveError::EntryNotFound(key))) => {
                Self::EntryNotFound(key)
            }
            ArcviewError::Archive(e) => Self::Document(e.to_string()),
            ArcviewError::Content(e) => Self::Resolve(e.to_string()),
            ArcviewError::Transform(e) => Self::Resolve(e.to_string()),
            ArcviewError::Store(e) => Self::Store(e.to_string()),
            ArcviewError::Split(e) => Self::Layout(e.to_string()),
            ArcviewError::Config(e) => Self::Config(e.to_string()),
            ArcviewError::Tracing(e) => Self::Config(e.to_string()),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, document open, store, IO)
    /// - 2: Content failure (entry not found, resolution failed)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            // Content-resolution failures use exit code 2
            Self::EntryNotFound(_) | Self::Resolve(_) => exit_codes::CONTENT_FAILURE,
            // All other errors use exit code 1
            Self::Config(_)
            | Self::Document(_)
            | Self::Store(_)
            | Self::Layout(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}

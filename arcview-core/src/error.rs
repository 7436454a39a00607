//! Workspace-level error type
//!
//! Each module defines its own error enum close to the code that raises
//! it; this module aggregates them behind [`ArcviewError`] for callers
//! that drive the whole workbench, with `#[from]` conversions so `?`
//! works across module boundaries.

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::config::ConfigError;
use crate::content::{ContentError, StoreError, TransformError};
use crate::split::SplitError;
use crate::tracing::TracingError;

/// Any error the workbench can produce.
#[derive(Debug, Error)]
pub enum ArcviewError {
    /// Split-tree or pane-registry operation failed
    #[error(transparent)]
    Split(#[from] SplitError),

    /// Archive could not be opened or read
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Content resolution failed
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Persistent store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Transform worker lifecycle or channel failure
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Configuration could not be loaded or saved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Tracing initialization failed
    #[error(transparent)]
    Tracing(#[from] TracingError),
}

/// Result type alias for workbench operations.
pub type Result<T> = std::result::Result<T, ArcviewError>;

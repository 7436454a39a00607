//! `arcview` Core Library
//!
//! This crate provides the core functionality for the `arcview` split-pane
//! workbench: browsing the internal parts of an archive-based document (a
//! `.docx` file is a zip of XML parts and images), viewing each part in a
//! code/text/image surface, and arranging multiple viewers side by side.
//!
//! # Crate Structure
//!
//! - [`split`] - Recursive split tree, pane registry, layout and drag-resize
//! - [`pane`] - Per-pane tab sessions and editor interaction
//! - [`content`] - Content kinds, cache tiers, XML transform worker
//! - [`archive`] - Archive reader trait with zip and in-memory backends
//! - [`workbench`] - Facade wiring the manager, resolver and collaborators
//! - [`editor`] - Editor component seam the host implements
//! - [`config`] - Settings and persistence
//! - [`recent`] - Recent-documents bookkeeping
//! - [`tracing`] - Structured logging setup

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod content;
pub mod editor;
pub mod error;
pub mod pane;
pub mod recent;
pub mod split;
pub mod tracing;
pub mod workbench;

// =============================================================================
// Convenience re-exports
//
// These flat re-exports exist for callers that want the main types without
// the modular paths. New code should prefer the modular paths (e.g.
// `arcview_core::split::SplitManager`) over the flat namespace.
// =============================================================================

pub use archive::{ArchiveError, ArchiveReader, ArchiveResult, MemoryArchive, ZipArchiveReader};
pub use config::{APP_DIR_NAME, CONFIG_FILE_NAME, ConfigError, ConfigResult, WorkbenchConfig};
pub use content::{
    ContentError, ContentKind, ContentResolver, ContentStore, DEFAULT_TRANSFORM_WORKERS,
    FileStore, IMAGE_EXTENSIONS, MemoryCache, MemoryStore, Resolution, StoreError, StoreResult,
    StoredEntry, TransformError, TransformReply, TransformReplyReceiver, TransformRequest,
    TransformRequestSender, TransformWorker, format_xml,
};
pub use editor::{Editor, EditorFactory, NullEditor, NullEditorFactory, ViewState};
pub use error::ArcviewError;
pub use pane::{Pane, Tab, TabContent, TabSession};
pub use recent::{DEFAULT_RECENT_CAPACITY, RecentDocuments, RecentEntry};
pub use split::{
    BranchId, BranchNode, DEFAULT_MIN_PANE_EXTENT, DEFAULT_SPLIT_RATIO, Divider, Layout, PaneId,
    PaneNode, PaneRect, Rect, RemoveResult, ResizeDrag, SplitDirection, SplitError, SplitManager,
};
pub use tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, field_names,
    get_tracing_config, init_tracing, is_tracing_initialized, span_names,
};
pub use workbench::{OpenOutcome, Workbench};

//! Content tier resolver
//!
//! This module walks the content tiers for one key: memory cache, then
//! persistent store, then the raw archive, then (for kinds that need it)
//! the background transform worker. Every hit is written back into the
//! faster tiers that missed, so the next open of the same key short-circuits
//! earlier.
//!
//! Store failures never fail a resolve. A read error degrades to a tier
//! miss and a write error to "the write did not happen"; both are logged at
//! warn level and the walk continues.

use std::sync::Arc;

use thiserror::Error;

use super::cache::MemoryCache;
use super::kind::ContentKind;
use super::store::ContentStore;
use super::transform::{TransformError, TransformReply, TransformRequest, TransformWorker};
use crate::archive::{ArchiveError, ArchiveReader};
use crate::split::PaneId;

/// Errors that can occur while resolving content
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// No document has been opened yet
    #[error("No document is open")]
    NoDocument,

    /// The raw source failed, including the entry not existing
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The transform worker could not accept a request
    #[error(transparent)]
    Worker(#[from] TransformError),
}

/// Outcome of a resolve: either content now, or a pending transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Text content served from a tier, ready to display.
    Ready {
        /// The resolved text
        text: String,
        /// Detected content kind
        kind: ContentKind,
    },
    /// Image bytes read straight from the archive, bypassing the caches.
    Image {
        /// Raw image bytes
        bytes: Vec<u8>,
    },
    /// A transform was dispatched; the reply will arrive on the worker's
    /// channel carrying this key and the requesting pane.
    Pending,
}

/// Walks the content tiers and maintains their write-through.
///
/// The resolver owns the two cache tiers (memory directly, the persistent
/// store by handle) and borrows the raw source and the worker per call; the
/// workbench decides which archive is open and when replies get pumped.
pub struct ContentResolver {
    /// Identity of the open document; scopes the persistent tier.
    document: Option<String>,
    /// Tier 1.
    cache: MemoryCache,
    /// Tier 2.
    store: Arc<dyn ContentStore>,
}

impl ContentResolver {
    /// Creates a resolver over a persistent store. No document is open yet.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            document: None,
            cache: MemoryCache::new(),
            store,
        }
    }

    /// Switches to a document, dropping the whole memory tier.
    ///
    /// The persistent tier is scoped by key prefix, not cleared; other
    /// documents' entries stay on disk.
    pub fn open_document(&mut self, identity: &str) {
        self.cache.clear();
        self.document = Some(identity.to_string());
        tracing::debug!(document = identity, "resolver scoped to document");
    }

    /// The identity of the open document.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Read access to the memory tier.
    #[must_use]
    pub const fn memory(&self) -> &MemoryCache {
        &self.cache
    }

    /// Handle to the persistent tier.
    #[must_use]
    pub fn store(&self) -> Arc<dyn ContentStore> {
        Arc::clone(&self.store)
    }

    /// Resolves a key through the tiers.
    ///
    /// Image keys read straight from the archive and skip both cache tiers.
    /// Text keys walk memory, store, archive in order; a `Code` entry found
    /// only in the archive is handed to the worker and resolves `Pending`.
    ///
    /// # Errors
    ///
    /// - [`ContentError::NoDocument`] before [`open_document`](Self::open_document)
    /// - [`ContentError::Archive`] if the entry is missing or unreadable
    /// - [`ContentError::Worker`] if a needed transform cannot be dispatched
    pub async fn resolve(
        &mut self,
        archive: &mut dyn ArchiveReader,
        worker: &TransformWorker,
        pane: PaneId,
        key: &str,
        display_name: &str,
    ) -> Result<Resolution, ContentError> {
        let document = self
            .document
            .as_ref()
            .ok_or(ContentError::NoDocument)?
            .clone();
        let kind = ContentKind::detect(key);

        if kind.is_image() {
            let bytes = archive.read_binary(key)?;
            tracing::trace!(key, tier = "archive", "image read");
            return Ok(Resolution::Image { bytes });
        }

        if let Some(text) = self.cache.get(key) {
            tracing::trace!(key, tier = "memory", "content hit");
            return Ok(Resolution::Ready {
                text: text.to_string(),
                kind,
            });
        }

        match self.store.load(&document, key).await {
            Ok(Some(text)) => {
                self.cache.insert(key.to_string(), text.clone());
                tracing::trace!(key, tier = "store", "content hit");
                return Ok(Resolution::Ready { text, kind });
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(key, error = %e, "store read failed; treating as miss");
            }
        }

        let text = archive.read_text(key)?;

        if kind.needs_transform() {
            worker.submit(TransformRequest {
                text,
                key: key.to_string(),
                display_name: display_name.to_string(),
                pane,
            })?;
            tracing::debug!(key, pane = %pane, "transform dispatched");
            return Ok(Resolution::Pending);
        }

        self.cache.insert(key.to_string(), text.clone());
        self.save_best_effort(&document, key, &text).await;
        tracing::trace!(key, tier = "archive", "content read");
        Ok(Resolution::Ready { text, kind })
    }

    /// Writes a successful transform reply into both cache tiers.
    ///
    /// Runs for every reply whether or not the requesting pane still
    /// exists; the caches outlive panes. Failure replies are not cached, so
    /// a later open retries the transform.
    pub async fn absorb_reply(&mut self, reply: &TransformReply) {
        if let TransformReply::Success {
            key, transformed, ..
        } = reply
        {
            self.cache.insert(key.clone(), transformed.clone());
            if let Some(document) = self.document.clone() {
                self.save_best_effort(&document, key, transformed).await;
            }
        }
    }

    async fn save_best_effort(&self, document: &str, key: &str, text: &str) {
        if let Err(e) = self.store.save(document, key, text).await {
            tracing::warn!(key, error = %e, "store write failed; continuing without persistence");
        }
    }
}

impl std::fmt::Debug for ContentResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentResolver")
            .field("document", &self.document)
            .field("cached_entries", &self.cache.len())
            .finish()
    }
}

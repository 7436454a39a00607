//! Workbench facade
//!
//! The [`Workbench`] wires the split manager, the content resolver and the
//! collaborator handles (archive reader, persistent store, editor factory,
//! transform worker) into one surface the CLI or a GUI embed drives.
//!
//! Two groups of operations have deliberately different error behavior.
//! Content operations (`open_document_file`, `open_entry`) return errors:
//! a missing archive entry or an unreadable file is something the caller
//! may want to surface. Structural operations on stale ids (`split_pane`,
//! `close_pane`, `set_active_pane`, the resize family) never fail: a
//! delayed callback holding an id for a pane that no longer exists must
//! not corrupt or crash the workbench, so those calls log and no-op.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::archive::{ArchiveReader, ZipArchiveReader};
use crate::config::WorkbenchConfig;
use crate::content::{
    ContentError, ContentKind, ContentResolver, ContentStore, Resolution, TransformReply,
    TransformWorker,
};
use crate::editor::EditorFactory;
use crate::error::Result;
use crate::pane::{Pane, TabContent};
use crate::recent::RecentDocuments;
use crate::split::{BranchId, Layout, PaneId, Rect, SplitDirection, SplitManager};

/// What an `open_entry` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Content resolved immediately and the tab is open.
    Opened,
    /// A transform was dispatched; the pane shows its loading state until
    /// [`Workbench::pump_transforms`] routes the reply.
    Loading,
    /// The target pane does not exist; nothing happened.
    Ignored,
}

/// The split-pane workbench over one open document.
pub struct Workbench {
    manager: SplitManager,
    resolver: ContentResolver,
    worker: TransformWorker,
    archive: Option<Box<dyn ArchiveReader>>,
    recent: RecentDocuments,
}

impl Workbench {
    /// Creates a workbench with default settings and an in-memory recent
    /// list.
    ///
    /// # Errors
    ///
    /// Returns an error if the transform worker fails to start.
    pub fn new(store: Arc<dyn ContentStore>, factory: Arc<dyn EditorFactory>) -> Result<Self> {
        Self::assemble(
            store,
            factory,
            &WorkbenchConfig::default(),
            RecentDocuments::default(),
        )
    }

    /// Creates a workbench from configuration.
    ///
    /// Applies the minimum pane extent and worker count, and binds the
    /// recent-documents list to its configured file.
    ///
    /// # Errors
    ///
    /// Returns an error if the transform worker fails to start.
    pub fn with_config(
        config: &WorkbenchConfig,
        store: Arc<dyn ContentStore>,
        factory: Arc<dyn EditorFactory>,
    ) -> Result<Self> {
        let recent = RecentDocuments::load(&config.recent_file(), config.recent_capacity);
        Self::assemble(store, factory, config, recent)
    }

    fn assemble(
        store: Arc<dyn ContentStore>,
        factory: Arc<dyn EditorFactory>,
        config: &WorkbenchConfig,
        recent: RecentDocuments,
    ) -> Result<Self> {
        let mut worker = TransformWorker::with_workers(config.transform_workers);
        worker.start()?;

        Ok(Self {
            manager: SplitManager::with_min_extent(factory, config.min_pane_extent),
            resolver: ContentResolver::new(store),
            worker,
            archive: None,
            recent,
        })
    }

    // ========================================================================
    // Document Lifecycle
    // ========================================================================

    /// Opens a document from an archive reader.
    ///
    /// The memory cache tier is dropped, the layout resets to a single
    /// fresh pane, and the resolver is scoped to the new document identity.
    /// Returns the initial pane's id.
    pub fn open_document(&mut self, archive: Box<dyn ArchiveReader>) -> PaneId {
        let identity = archive.identity().to_string();
        tracing::info!(
            document = %identity,
            entry_count = archive.entries().len(),
            "document opened"
        );

        self.archive = Some(archive);
        self.resolver.open_document(&identity);
        self.manager.reset()
    }

    /// Opens a document file as a zip archive and records it in the recent
    /// list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened as an archive.
    pub fn open_document_file(&mut self, path: &Path) -> Result<PaneId> {
        let reader = ZipArchiveReader::open(path)?;
        let identity = reader.identity().to_string();
        let pane = self.open_document(Box::new(reader));
        self.recent.record(&identity, path);
        Ok(pane)
    }

    /// Identity of the open document, if any.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.resolver.document()
    }

    /// Entry paths of the open document, in archive order.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.archive
            .as_ref()
            .map_or_else(Vec::new, |archive| archive.entries())
    }

    /// The recent-documents list.
    #[must_use]
    pub const fn recent(&self) -> &RecentDocuments {
        &self.recent
    }

    // ========================================================================
    // Content Operations
    // ========================================================================

    /// Opens an entry in the active pane.
    ///
    /// # Errors
    ///
    /// - [`ContentError::NoDocument`] when no document is open
    /// - [`ContentError::Archive`] when the entry is missing or unreadable;
    ///   the open is abandoned and no tab is created
    pub async fn open_entry(&mut self, key: &str) -> Result<OpenOutcome> {
        let Some(pane_id) = self.manager.active_pane_id() else {
            return Err(ContentError::NoDocument.into());
        };
        self.open_entry_in(pane_id, key).await
    }

    /// Opens an entry in a specific pane and makes that pane active.
    ///
    /// An unknown pane id is a structural no-op returning
    /// [`OpenOutcome::Ignored`].
    ///
    /// # Errors
    ///
    /// Same as [`open_entry`](Self::open_entry).
    pub async fn open_entry_in(&mut self, pane_id: PaneId, key: &str) -> Result<OpenOutcome> {
        if !self.manager.contains_pane(pane_id) {
            tracing::warn!(pane_id = %pane_id, key, "open for an unknown pane ignored");
            return Ok(OpenOutcome::Ignored);
        }
        let Some(archive) = self.archive.as_mut() else {
            return Err(ContentError::NoDocument.into());
        };

        let display_name = display_name_for(key);
        let resolution = self
            .resolver
            .resolve(archive.as_mut(), &self.worker, pane_id, key, &display_name)
            .await?;

        match resolution {
            Resolution::Ready { text, kind } => {
                self.manager
                    .open_in_pane(pane_id, key, &display_name, TabContent::text(text), kind)?;
                Ok(OpenOutcome::Opened)
            }
            Resolution::Image { bytes } => {
                self.manager.open_in_pane(
                    pane_id,
                    key,
                    &display_name,
                    TabContent::image(bytes),
                    ContentKind::Image,
                )?;
                Ok(OpenOutcome::Opened)
            }
            Resolution::Pending => {
                if let Some(pane) = self.manager.pane_mut(pane_id) {
                    pane.set_loading(true);
                }
                Ok(OpenOutcome::Loading)
            }
        }
    }

    /// Drains every transform reply currently queued, returning how many
    /// were handled.
    ///
    /// Each reply's content is written through the cache tiers whether or
    /// not its pane still exists; the tab is routed only to a surviving
    /// pane, without changing which pane is active.
    pub async fn pump_transforms(&mut self) -> usize {
        let mut handled = 0;
        while let Some(reply) = self.worker.try_recv_reply() {
            self.handle_reply(reply).await;
            handled += 1;
        }
        handled
    }

    /// Waits up to `timeout` for a transform reply, then drains the queue.
    ///
    /// Returns how many replies were handled; zero means the timeout
    /// elapsed with nothing in flight arriving.
    pub async fn await_transforms(&mut self, timeout: Duration) -> usize {
        match self.worker.recv_reply_timeout(timeout) {
            Some(reply) => {
                self.handle_reply(reply).await;
                1 + self.pump_transforms().await
            }
            None => 0,
        }
    }

    async fn handle_reply(&mut self, reply: TransformReply) {
        // Cache tiers are written for every reply; they outlive panes.
        self.resolver.absorb_reply(&reply).await;

        let pane_id = reply.pane();
        if !self.manager.contains_pane(pane_id) {
            tracing::debug!(
                pane_id = %pane_id,
                key = reply.key(),
                "transform reply for a closed pane dropped"
            );
            return;
        }

        let display_name = display_name_for(reply.key());
        match reply {
            TransformReply::Success {
                key, transformed, ..
            } => {
                if let Some(pane) = self.manager.pane_mut(pane_id) {
                    pane.open_tab(
                        &key,
                        &display_name,
                        TabContent::text(transformed),
                        ContentKind::Code,
                    );
                }
            }
            TransformReply::Failure { key, error, .. } => {
                tracing::warn!(key = %key, error = %error, "transform failed; showing error text");
                if let Some(pane) = self.manager.pane_mut(pane_id) {
                    pane.open_tab(
                        &key,
                        &display_name,
                        TabContent::text(format!("Error formatting XML: {error}")),
                        ContentKind::Plaintext,
                    );
                }
            }
        }
    }

    // ========================================================================
    // Structural Operations (stale ids log and no-op)
    // ========================================================================

    /// Splits the active pane; the new pane becomes active.
    ///
    /// Returns `None` when no document is open.
    pub fn split_active(&mut self, direction: SplitDirection) -> Option<PaneId> {
        let pane_id = self.manager.active_pane_id()?;
        self.split_pane(pane_id, direction)
    }

    /// Splits a pane; the new pane becomes active.
    ///
    /// An unknown pane id logs and returns `None`.
    pub fn split_pane(&mut self, pane_id: PaneId, direction: SplitDirection) -> Option<PaneId> {
        match self.manager.split_pane(pane_id, direction) {
            Ok(new_pane) => Some(new_pane),
            Err(e) => {
                tracing::warn!(pane_id = %pane_id, error = %e, "split ignored");
                None
            }
        }
    }

    /// Closes a pane, collapsing its parent branch.
    ///
    /// Closing the last pane or an unknown id logs and no-ops.
    pub fn close_pane(&mut self, pane_id: PaneId) {
        if let Err(e) = self.manager.close_pane(pane_id) {
            tracing::warn!(pane_id = %pane_id, error = %e, "close ignored");
        }
    }

    /// Makes a pane active.
    ///
    /// An unknown pane id logs and no-ops.
    pub fn set_active_pane(&mut self, pane_id: PaneId) {
        if let Err(e) = self.manager.set_active_pane(pane_id) {
            tracing::warn!(pane_id = %pane_id, error = %e, "activate ignored");
        }
    }

    /// Id of the active pane, if any.
    #[must_use]
    pub const fn active_pane_id(&self) -> Option<PaneId> {
        self.manager.active_pane_id()
    }

    /// Looks up a pane by id.
    #[must_use]
    pub fn pane(&self, pane_id: PaneId) -> Option<&Pane> {
        self.manager.pane(pane_id)
    }

    /// Read access to the split manager.
    #[must_use]
    pub const fn manager(&self) -> &SplitManager {
        &self.manager
    }

    /// Sets the viewport rectangle the layout is computed into.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.manager.set_viewport(viewport);
    }

    /// Computes the current layout, if a document is open.
    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        self.manager.layout()
    }

    /// Starts a divider drag.
    ///
    /// Returns `false` (logging) for an unknown branch.
    pub fn begin_resize(&mut self, branch_id: BranchId, pointer_start: f64) -> bool {
        match self.manager.begin_resize(branch_id, pointer_start) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(branch_id = %branch_id, error = %e, "resize start ignored");
                false
            }
        }
    }

    /// Applies a pointer move to the drag in progress.
    pub fn update_resize(&mut self, pointer: f64) -> bool {
        self.manager.update_resize(pointer)
    }

    /// Ends the drag in progress, wherever the pointer is.
    pub fn end_resize(&mut self) {
        self.manager.end_resize();
    }

    /// One-shot ratio adjustment by a pointer delta along the branch axis.
    ///
    /// An unknown branch id logs and no-ops.
    pub fn resize_by(&mut self, branch_id: BranchId, delta: f64) {
        if let Err(e) = self.manager.resize_by(branch_id, delta) {
            tracing::warn!(branch_id = %branch_id, error = %e, "resize ignored");
        }
    }
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("document", &self.document())
            .field("manager", &self.manager)
            .field("worker_running", &self.worker.is_running())
            .finish()
    }
}

/// Tab label for a key: its last path segment.
fn display_name_for(key: &str) -> String {
    key.rsplit('/').next().unwrap_or(key).to_string()
}

//! Split workspace manager
//!
//! This module provides the [`SplitManager`] struct which owns the pane
//! tree, the pane registry, the active-pane marker and the divider drag
//! state for one workspace.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arcview_core::editor::NullEditorFactory;
//! use arcview_core::split::{SplitDirection, SplitManager};
//!
//! let mut manager = SplitManager::new(Arc::new(NullEditorFactory));
//!
//! // Initially there are no panes at all.
//! assert_eq!(manager.pane_count(), 0);
//!
//! let first = manager.initialize();
//! assert_eq!(manager.pane_count(), 1);
//! assert_eq!(manager.active_pane_id(), Some(first));
//!
//! // Split the initial pane; the new pane becomes active.
//! let second = manager.split_pane(first, SplitDirection::Vertical).unwrap();
//! assert_eq!(manager.pane_count(), 2);
//! assert_eq!(manager.active_pane_id(), Some(second));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::error::SplitError;
use super::layout::{Layout, Rect};
use super::resize::ResizeDrag;
use super::tree::{PaneNode, RemoveResult};
use super::types::{BranchId, PaneId, SplitDirection};
use crate::content::ContentKind;
use crate::editor::EditorFactory;
use crate::pane::{Pane, TabContent};

/// Minimum extent, in layout units, a pane keeps along a divider's axis
/// during a resize.
pub const DEFAULT_MIN_PANE_EXTENT: f64 = 100.0;

/// Manages the split workspace: the pane tree, the pane registry and the
/// active-pane marker.
///
/// # Layout States
///
/// - **Uninitialized**: `root` is `None`; every structural operation fails
///   with [`SplitError::NotInitialized`]
/// - **Initialized**: `root` is `Some(PaneNode)`; the tree always covers
///   the registry exactly, and exactly one pane is active
///
/// # Identity
///
/// Pane and branch ids are minted from monotonic counters and never reused,
/// so a stale id held across a close can never address a different pane.
pub struct SplitManager {
    /// Root of the pane tree (None until [`initialize`](Self::initialize)).
    root: Option<PaneNode>,
    /// Pane registry, keyed by id.
    panes: HashMap<PaneId, Pane>,
    /// Id of the currently active pane.
    active_pane: Option<PaneId>,
    /// Next pane id to mint. Starts at 1; id 0 is never handed out.
    next_pane_id: u64,
    /// Next branch id to mint. Starts at 1.
    next_branch_id: u64,
    /// Workspace rectangle the tree is laid out into.
    viewport: Rect,
    /// Minimum pane extent enforced during resizes.
    min_extent: f64,
    /// In-progress divider drag, if any.
    drag: ResizeDrag,
    /// Creates an editor when a pane first displays text.
    factory: Arc<dyn EditorFactory>,
}

impl SplitManager {
    /// Creates an uninitialized manager with the default minimum pane
    /// extent.
    #[must_use]
    pub fn new(factory: Arc<dyn EditorFactory>) -> Self {
        Self::with_min_extent(factory, DEFAULT_MIN_PANE_EXTENT)
    }

    /// Creates an uninitialized manager with a custom minimum pane extent.
    #[must_use]
    pub fn with_min_extent(factory: Arc<dyn EditorFactory>, min_extent: f64) -> Self {
        Self {
            root: None,
            panes: HashMap::new(),
            active_pane: None,
            next_pane_id: 1,
            next_branch_id: 1,
            viewport: Rect::new(0.0, 0.0, 0.0, 0.0),
            min_extent,
            drag: ResizeDrag::Idle,
            factory,
        }
    }

    /// Creates the initial pane and makes it active.
    ///
    /// Calling this again on an initialized manager is a no-op that logs a
    /// warning and returns the first pane in the existing tree.
    pub fn initialize(&mut self) -> PaneId {
        if let Some(root) = &self.root {
            tracing::warn!("initialize called on an initialized workspace");
            return root.first_pane();
        }

        let id = self.mint_pane_id();
        self.panes.insert(id, Pane::new(id, Arc::clone(&self.factory)));
        self.root = Some(PaneNode::Leaf(id));
        self.active_pane = Some(id);
        tracing::debug!(pane = %id, "workspace initialized");
        id
    }

    /// Discards every pane and starts over with a single fresh pane.
    ///
    /// Used when a new document is opened: the layout resets but the id
    /// counters keep counting, so a transform reply addressed to a pane of
    /// the previous layout can never land in a new one.
    pub fn reset(&mut self) -> PaneId {
        self.panes.clear();
        self.root = None;
        self.active_pane = None;
        self.drag = ResizeDrag::Idle;
        self.initialize()
    }

    /// Returns true once [`initialize`](Self::initialize) has run.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.root.is_some()
    }

    /// Returns the total number of panes.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Returns all pane ids in tree order (depth-first, first child before
    /// second).
    #[must_use]
    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.root.as_ref().map_or_else(Vec::new, PaneNode::pane_ids)
    }

    /// Returns true if the workspace contains the pane.
    #[must_use]
    pub fn contains_pane(&self, pane_id: PaneId) -> bool {
        self.panes.contains_key(&pane_id)
    }

    /// Returns the id of the active pane.
    #[must_use]
    pub const fn active_pane_id(&self) -> Option<PaneId> {
        self.active_pane
    }

    /// Returns the active pane.
    #[must_use]
    pub fn active_pane(&self) -> Option<&Pane> {
        self.active_pane.and_then(|id| self.panes.get(&id))
    }

    /// Returns the active pane mutably.
    pub fn active_pane_mut(&mut self) -> Option<&mut Pane> {
        self.active_pane.and_then(|id| self.panes.get_mut(&id))
    }

    /// Returns a pane by id.
    #[must_use]
    pub fn pane(&self, pane_id: PaneId) -> Option<&Pane> {
        self.panes.get(&pane_id)
    }

    /// Returns a pane by id, mutably.
    pub fn pane_mut(&mut self, pane_id: PaneId) -> Option<&mut Pane> {
        self.panes.get_mut(&pane_id)
    }

    /// Returns the root of the pane tree.
    #[must_use]
    pub const fn root(&self) -> Option<&PaneNode> {
        self.root.as_ref()
    }

    /// Makes a pane active.
    ///
    /// # Errors
    ///
    /// - [`SplitError::NotInitialized`] before the first pane exists
    /// - [`SplitError::PaneNotFound`] if the pane does not exist
    pub fn set_active_pane(&mut self, pane_id: PaneId) -> Result<(), SplitError> {
        if self.root.is_none() {
            return Err(SplitError::NotInitialized);
        }
        if !self.panes.contains_key(&pane_id) {
            return Err(SplitError::PaneNotFound(pane_id));
        }
        self.active_pane = Some(pane_id);
        Ok(())
    }

    /// Splits a pane in the given direction.
    ///
    /// The target leaf is replaced by a branch whose first child is the
    /// original pane and whose second child is a new empty pane at an even
    /// ratio. The new pane becomes active.
    ///
    /// # Returns
    ///
    /// The id of the newly created pane.
    ///
    /// # Errors
    ///
    /// - [`SplitError::NotInitialized`] before the first pane exists
    /// - [`SplitError::PaneNotFound`] if the target does not exist
    pub fn split_pane(
        &mut self,
        target: PaneId,
        direction: SplitDirection,
    ) -> Result<PaneId, SplitError> {
        let Some(root) = self.root.as_mut() else {
            return Err(SplitError::NotInitialized);
        };

        let new_pane = PaneId::new(self.next_pane_id);
        let new_branch = BranchId::new(self.next_branch_id);
        if !root.insert_split(target, direction, new_pane, new_branch) {
            return Err(SplitError::PaneNotFound(target));
        }
        self.next_pane_id += 1;
        self.next_branch_id += 1;

        self.panes
            .insert(new_pane, Pane::new(new_pane, Arc::clone(&self.factory)));
        self.active_pane = Some(new_pane);

        tracing::debug!(
            target = %target,
            new_pane = %new_pane,
            direction = %direction,
            "pane split"
        );
        Ok(new_pane)
    }

    /// Closes a pane, promoting its sibling into the parent's slot.
    ///
    /// The closed pane's tabs and editor are dropped. If it was active, the
    /// first pane in tree order becomes active. A drag on a divider that
    /// disappears with the closed pane ends.
    ///
    /// # Errors
    ///
    /// - [`SplitError::NotInitialized`] before the first pane exists
    /// - [`SplitError::PaneNotFound`] if the pane does not exist
    /// - [`SplitError::CannotCloseLastPane`] if this is the only pane
    pub fn close_pane(&mut self, pane_id: PaneId) -> Result<(), SplitError> {
        let Some(root) = self.root.as_mut() else {
            return Err(SplitError::NotInitialized);
        };
        if !self.panes.contains_key(&pane_id) {
            return Err(SplitError::PaneNotFound(pane_id));
        }

        match root.remove_pane(pane_id) {
            RemoveResult::NotFound => Err(SplitError::PaneNotFound(pane_id)),
            RemoveResult::RemovedSelf => Err(SplitError::CannotCloseLastPane),
            RemoveResult::Removed => {
                // Dropping the pane disposes its editor.
                self.panes.remove(&pane_id);

                if self.active_pane == Some(pane_id) {
                    self.active_pane = self.root.as_ref().map(PaneNode::first_pane);
                }
                self.end_drag_if_branch_gone();

                tracing::debug!(pane = %pane_id, remaining = self.panes.len(), "pane closed");
                Ok(())
            }
        }
    }

    /// Opens a tab in the active pane.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::NotInitialized`] before the first pane exists.
    pub fn dispatch_open(
        &mut self,
        key: &str,
        display_name: &str,
        content: TabContent,
        kind: ContentKind,
    ) -> Result<(), SplitError> {
        let Some(pane) = self.active_pane_mut() else {
            return Err(SplitError::NotInitialized);
        };
        pane.open_tab(key, display_name, content, kind);
        Ok(())
    }

    /// Opens a tab in a specific pane and makes that pane active.
    ///
    /// # Errors
    ///
    /// - [`SplitError::NotInitialized`] before the first pane exists
    /// - [`SplitError::PaneNotFound`] if the pane does not exist
    pub fn open_in_pane(
        &mut self,
        pane_id: PaneId,
        key: &str,
        display_name: &str,
        content: TabContent,
        kind: ContentKind,
    ) -> Result<(), SplitError> {
        if self.root.is_none() {
            return Err(SplitError::NotInitialized);
        }
        let Some(pane) = self.panes.get_mut(&pane_id) else {
            return Err(SplitError::PaneNotFound(pane_id));
        };
        pane.open_tab(key, display_name, content, kind);
        self.active_pane = Some(pane_id);
        Ok(())
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Sets the workspace rectangle the tree is laid out into.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Returns the workspace rectangle.
    #[must_use]
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Returns the minimum pane extent enforced during resizes.
    #[must_use]
    pub const fn min_extent(&self) -> f64 {
        self.min_extent
    }

    /// Computes pane rectangles and divider positions for the current tree
    /// and viewport.
    ///
    /// Returns `None` before initialization.
    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        self.root
            .as_ref()
            .map(|root| Layout::compute(root, self.viewport))
    }

    /// Sets a branch's split ratio directly.
    ///
    /// # Errors
    ///
    /// - [`SplitError::InvalidRatio`] if the ratio is not finite or lies
    ///   outside the open interval (0, 1)
    /// - [`SplitError::BranchNotFound`] if the branch does not exist
    pub fn set_ratio(&mut self, branch_id: BranchId, ratio: f64) -> Result<(), SplitError> {
        if !ratio.is_finite() || ratio <= 0.0 || ratio >= 1.0 {
            return Err(SplitError::InvalidRatio(ratio));
        }
        let applied = self
            .root
            .as_mut()
            .is_some_and(|root| root.set_ratio(branch_id, ratio));
        if applied {
            Ok(())
        } else {
            Err(SplitError::BranchNotFound(branch_id))
        }
    }

    // ========================================================================
    // Divider Resizing
    // ========================================================================

    /// Starts a divider drag at a pointer position along the divider's axis.
    ///
    /// Captures the divider's neighboring extents once; subsequent
    /// [`update_resize`](Self::update_resize) calls are interpreted against
    /// this snapshot, not against the moving layout.
    ///
    /// # Errors
    ///
    /// - [`SplitError::NotInitialized`] before the first pane exists
    /// - [`SplitError::BranchNotFound`] if the branch does not exist
    pub fn begin_resize(&mut self, branch_id: BranchId, start: f64) -> Result<(), SplitError> {
        let layout = self.layout().ok_or(SplitError::NotInitialized)?;
        let divider = layout
            .divider(branch_id)
            .ok_or(SplitError::BranchNotFound(branch_id))?;
        self.drag = ResizeDrag::begin(divider, start);
        tracing::trace!(branch = %branch_id, start, "resize started");
        Ok(())
    }

    /// Applies a pointer position to the drag in progress.
    ///
    /// The new ratio is clamped so both neighbors keep at least the minimum
    /// extent. Returns true if the ratio changed. Pointer movement with no
    /// drag in progress is ignored.
    pub fn update_resize(&mut self, pointer: f64) -> bool {
        let Some(ratio) = self.drag.ratio_for(pointer, self.min_extent) else {
            return false;
        };
        let Some(branch_id) = self.drag.branch() else {
            return false;
        };
        self.root
            .as_mut()
            .is_some_and(|root| root.set_ratio(branch_id, ratio))
    }

    /// Ends the drag in progress, if any.
    pub fn end_resize(&mut self) {
        self.drag.end();
    }

    /// Returns true while a divider drag is in progress.
    #[must_use]
    pub const fn is_resizing(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Moves a divider by a delta along its axis in one step.
    ///
    /// Equivalent to a drag that starts on the divider and releases after
    /// moving `delta` units, including the minimum-extent clamp. When the
    /// two neighbors together cannot fit twice the minimum extent the
    /// divider stays put.
    ///
    /// # Errors
    ///
    /// - [`SplitError::NotInitialized`] before the first pane exists
    /// - [`SplitError::BranchNotFound`] if the branch does not exist
    pub fn resize_by(&mut self, branch_id: BranchId, delta: f64) -> Result<(), SplitError> {
        let layout = self.layout().ok_or(SplitError::NotInitialized)?;
        let divider = layout
            .divider(branch_id)
            .ok_or(SplitError::BranchNotFound(branch_id))?;

        let start = divider.axis_position();
        let drag = ResizeDrag::begin(divider, start);
        if let Some(ratio) = drag.ratio_for(start + delta, self.min_extent) {
            if let Some(root) = self.root.as_mut() {
                root.set_ratio(branch_id, ratio);
            }
        }
        Ok(())
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn mint_pane_id(&mut self) -> PaneId {
        let id = PaneId::new(self.next_pane_id);
        self.next_pane_id += 1;
        id
    }

    /// Ends the drag if its divider's branch no longer exists.
    fn end_drag_if_branch_gone(&mut self) {
        let Some(branch_id) = self.drag.branch() else {
            return;
        };
        let gone = self
            .root
            .as_ref()
            .is_none_or(|root| root.find_branch(branch_id).is_none());
        if gone {
            self.drag.end();
        }
    }
}

impl std::fmt::Debug for SplitManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitManager")
            .field("root", &self.root)
            .field("pane_count", &self.panes.len())
            .field("active_pane", &self.active_pane)
            .field("viewport", &self.viewport)
            .field("drag", &self.drag)
            .finish()
    }
}

//! Split workspace module
//!
//! This module provides the data model for a recursively splittable
//! workspace. The workspace is a binary tree of panes; each branch carries
//! a direction and a ratio, each leaf is one editing pane with its own tab
//! session.
//!
//! # Architecture
//!
//! - **Tree-based structure**: Panes organized in a binary tree with
//!   recursive nesting
//! - **Stable identity**: Pane and branch ids come from monotonic counters
//!   and are never reused
//! - **Geometry separated from structure**: The tree stores ratios; the
//!   [`Layout`] pass turns them into rectangles and divider positions
//! - **Clamped resizing**: Divider drags snapshot extents on press and keep
//!   both neighbors at a minimum extent
//!
//! # Module Structure
//!
//! - `types` - Core type definitions (`PaneId`, `BranchId`, `SplitDirection`)
//! - `tree` - Pane tree structure (`PaneNode`, `BranchNode`, `RemoveResult`)
//! - `layout` - Geometry pass (`Layout`, `Rect`, `PaneRect`, `Divider`)
//! - `resize` - Divider drag state machine (`ResizeDrag`)
//! - `manager` - Workspace manager (`SplitManager`)
//! - `error` - Error types (`SplitError`)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arcview_core::editor::NullEditorFactory;
//! use arcview_core::split::{Rect, SplitDirection, SplitManager};
//!
//! let mut manager = SplitManager::new(Arc::new(NullEditorFactory));
//! manager.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! let first = manager.initialize();
//! let second = manager.split_pane(first, SplitDirection::Vertical).unwrap();
//!
//! // Both panes got half the viewport width.
//! let layout = manager.layout().unwrap();
//! assert_eq!(layout.pane_rect(second).unwrap().width, 400.0);
//! ```

mod error;
mod layout;
mod manager;
mod resize;
mod tree;
mod types;

pub use error::SplitError;
pub use layout::{Divider, Layout, PaneRect, Rect};
pub use manager::{DEFAULT_MIN_PANE_EXTENT, SplitManager};
pub use resize::ResizeDrag;
pub use tree::{BranchNode, DEFAULT_SPLIT_RATIO, PaneNode, RemoveResult};
pub use types::{BranchId, PaneId, SplitDirection};

//! Core type definitions for the split layout
//!
//! This module contains the fundamental identifier types and enums used
//! throughout the split-pane system.

use std::fmt;

/// Unique identifier for a pane within a split layout.
///
/// Pane ids are minted from a monotonically increasing counter owned by the
/// manager and are never reused, even after the pane is closed. A background
/// reply addressed to a closed pane can therefore never alias a newer pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(pub u64);

impl PaneId {
    /// Creates a pane ID from a raw counter value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pane({})", self.0)
    }
}

/// Unique identifier for a branch node in the split tree.
///
/// Branch ids address a divider for resize operations. They come from their
/// own monotonic counter and survive unrelated tree mutations; a branch id
/// only dies when its branch collapses after a pane close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchId(pub u64);

impl BranchId {
    /// Creates a branch ID from a raw counter value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Branch({})", self.0)
    }
}

/// Split direction for dividing panes.
///
/// When a pane is split, it is divided into two child panes arranged either
/// horizontally (top/bottom) or vertically (left/right).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    /// Split horizontally, creating top and bottom panes.
    Horizontal,
    /// Split vertically, creating left and right panes.
    Vertical,
}

impl SplitDirection {
    /// Parses a direction from its lowercase name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "Horizontal"),
            Self::Vertical => write!(f, "Vertical"),
        }
    }
}

//! Divider drag interaction for split layouts
//!
//! A drag goes `Idle -> Dragging -> Idle`. Pointer-down on a divider captures
//! the two adjacent extents and the pointer's starting coordinate along the
//! branch axis; every pointer-move recomputes both extents from the delta and
//! clamps so neither side drops below the minimum extent. Pointer-up always
//! returns to `Idle`, wherever the pointer is.

use super::layout::Divider;
use super::types::BranchId;

/// State of the divider drag interaction.
///
/// The captured extents are the baseline for the whole drag: each move is
/// computed from the pointer's total delta since pointer-down, so a pointer
/// that leaves the clamp range and comes back tracks the divider without
/// snap-back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeDrag {
    /// No drag in progress.
    Idle,
    /// Pointer held down on a divider.
    Dragging {
        /// The branch being resized.
        branch: BranchId,
        /// Pointer coordinate along the branch axis at pointer-down.
        start: f64,
        /// First child's extent at pointer-down.
        first_extent: f64,
        /// Second child's extent at pointer-down.
        second_extent: f64,
    },
}

impl ResizeDrag {
    /// Enters the dragging state for a divider.
    #[must_use]
    pub const fn begin(divider: &Divider, start: f64) -> Self {
        Self::Dragging {
            branch: divider.branch,
            start,
            first_extent: divider.first_extent,
            second_extent: divider.second_extent,
        }
    }

    /// Returns true if a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Returns the branch being dragged, if any.
    #[must_use]
    pub const fn branch(&self) -> Option<BranchId> {
        match self {
            Self::Idle => None,
            Self::Dragging { branch, .. } => Some(*branch),
        }
    }

    /// Computes the ratio for a pointer position along the branch axis.
    ///
    /// The pointer delta since pointer-down is applied to the captured
    /// extents and clamped so both sides keep at least `min_extent`. Returns
    /// `None` when idle or when the branch is too small to honor the minimum
    /// on both sides, in which case the caller keeps the last valid ratio.
    #[must_use]
    pub fn ratio_for(&self, pointer: f64, min_extent: f64) -> Option<f64> {
        let Self::Dragging {
            start,
            first_extent,
            second_extent,
            ..
        } = self
        else {
            return None;
        };

        let total = first_extent + second_extent;
        if total <= 2.0 * min_extent {
            return None;
        }

        let delta = pointer - start;
        let first = (first_extent + delta).clamp(min_extent, total - min_extent);
        Some(first / total)
    }

    /// Exits the dragging state. Safe to call when already idle.
    pub fn end(&mut self) {
        *self = Self::Idle;
    }
}

impl Default for ResizeDrag {
    fn default() -> Self {
        Self::Idle
    }
}

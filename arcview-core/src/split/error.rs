//! Error types for split layout operations
//!
//! This module defines the error types used throughout the split-pane
//! system. Structural misuse (stale pane ids, closing the last pane) is
//! reported through these errors internally; the manager's public surface
//! degrades them to logged no-ops so a delayed UI callback can never leave
//! the workbench in an invalid state.

use super::types::{BranchId, PaneId};

/// Errors that can occur during split layout operations.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// The layout has not been initialized yet.
    #[error("layout is not initialized")]
    NotInitialized,

    /// The specified pane was not found.
    #[error("pane not found: {0}")]
    PaneNotFound(PaneId),

    /// The specified branch was not found.
    #[error("branch not found: {0}")]
    BranchNotFound(BranchId),

    /// Cannot close the last pane in a layout.
    #[error("cannot close the last pane")]
    CannotCloseLastPane,

    /// Invalid split ratio (must be strictly between 0.0 and 1.0).
    #[error("invalid split ratio: {0} (must be between 0.0 and 1.0)")]
    InvalidRatio(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_error_display_not_initialized() {
        let err = SplitError::NotInitialized;
        assert_eq!(format!("{err}"), "layout is not initialized");
    }

    #[test]
    fn split_error_display_pane_not_found() {
        let err = SplitError::PaneNotFound(PaneId::new(4));
        assert!(format!("{err}").contains("pane not found"));
        assert!(format!("{err}").contains("Pane(4)"));
    }

    #[test]
    fn split_error_display_branch_not_found() {
        let err = SplitError::BranchNotFound(BranchId::new(2));
        assert!(format!("{err}").contains("branch not found"));
    }

    #[test]
    fn split_error_display_cannot_close_last_pane() {
        let err = SplitError::CannotCloseLastPane;
        assert_eq!(format!("{err}"), "cannot close the last pane");
    }

    #[test]
    fn split_error_display_invalid_ratio() {
        let err = SplitError::InvalidRatio(1.5);
        assert!(format!("{err}").contains("invalid split ratio"));
        assert!(format!("{err}").contains("1.5"));
    }
}

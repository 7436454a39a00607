//! Property-based tests for the split workspace
//!
//! These tests drive a [`SplitManager`] through arbitrary sequences of
//! split, close, activate and resize operations and check the invariants
//! that hold after any sequence: the pane tree and the registry agree, the
//! active pane is always live, pane ids are never reused, and the computed
//! layout tiles the viewport.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use arcview_core::editor::NullEditorFactory;
use arcview_core::split::{Layout, PaneId, Rect, SplitDirection, SplitError, SplitManager};

// ============================================================================
// Test Strategies
// ============================================================================

const VIEWPORT_WIDTH: f64 = 1600.0;
const VIEWPORT_HEIGHT: f64 = 1200.0;

/// Strategy for generating split directions
fn direction_strategy() -> impl Strategy<Value = SplitDirection> {
    prop_oneof![
        Just(SplitDirection::Horizontal),
        Just(SplitDirection::Vertical),
    ]
}

/// An operation on the split workspace.
///
/// Panes and dividers are addressed by index modulo the current count, so
/// any generated value stays applicable as the tree changes shape.
#[derive(Debug, Clone)]
enum WorkspaceOperation {
    /// Split the pane at the index in the given direction.
    Split {
        pane_index: usize,
        direction: SplitDirection,
    },
    /// Close the pane at the index.
    Close { pane_index: usize },
    /// Activate the pane at the index.
    Activate { pane_index: usize },
    /// Move the divider at the index by a delta along its axis.
    Resize { branch_index: usize, delta: f64 },
}

/// Strategy for generating workspace operations
fn operation_strategy() -> impl Strategy<Value = WorkspaceOperation> {
    prop_oneof![
        (0usize..8, direction_strategy()).prop_map(|(pane_index, direction)| {
            WorkspaceOperation::Split {
                pane_index,
                direction,
            }
        }),
        (0usize..8).prop_map(|pane_index| WorkspaceOperation::Close { pane_index }),
        (0usize..8).prop_map(|pane_index| WorkspaceOperation::Activate { pane_index }),
        (0usize..8, -2000.0f64..2000.0).prop_map(|(branch_index, delta)| {
            WorkspaceOperation::Resize {
                branch_index,
                delta,
            }
        }),
    ]
}

/// Strategy for generating a sequence of workspace operations
fn operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<WorkspaceOperation>> {
    proptest::collection::vec(operation_strategy(), 0..=max_ops)
}

/// Creates an initialized workspace over a fixed viewport.
fn workspace() -> SplitManager {
    let mut manager = SplitManager::new(Arc::new(NullEditorFactory));
    manager.set_viewport(Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT));
    manager.initialize();
    manager
}

/// Applies one operation, ignoring rejections.
///
/// Returns the id of a pane created by a split so callers can track minted
/// ids.
fn apply_operation(manager: &mut SplitManager, op: &WorkspaceOperation) -> Option<PaneId> {
    match op {
        WorkspaceOperation::Split {
            pane_index,
            direction,
        } => {
            let ids = manager.pane_ids();
            if ids.is_empty() {
                return None;
            }
            let target = ids[pane_index % ids.len()];
            manager.split_pane(target, *direction).ok()
        }
        WorkspaceOperation::Close { pane_index } => {
            let ids = manager.pane_ids();
            if !ids.is_empty() {
                let target = ids[pane_index % ids.len()];
                let _ = manager.close_pane(target);
            }
            None
        }
        WorkspaceOperation::Activate { pane_index } => {
            let ids = manager.pane_ids();
            if !ids.is_empty() {
                let target = ids[pane_index % ids.len()];
                let _ = manager.set_active_pane(target);
            }
            None
        }
        WorkspaceOperation::Resize {
            branch_index,
            delta,
        } => {
            if let Some(layout) = manager.layout() {
                if !layout.dividers.is_empty() {
                    let branch = layout.dividers[branch_index % layout.dividers.len()].branch;
                    let _ = manager.resize_by(branch, *delta);
                }
            }
            None
        }
    }
}

/// Splits once if the workspace is down to a single pane, so close and
/// resize operations have something to act on.
fn ensure_two_panes(manager: &mut SplitManager) {
    if manager.pane_count() == 1 {
        let only = manager.pane_ids()[0];
        manager.split_pane(only, SplitDirection::Vertical).unwrap();
    }
}

/// Captures the observable state of a workspace for comparison.
#[derive(Debug, Clone, PartialEq)]
struct WorkspaceSnapshot {
    pane_ids: Vec<PaneId>,
    active: Option<PaneId>,
    pane_count: usize,
    layout: Option<Layout>,
}

impl WorkspaceSnapshot {
    fn capture(manager: &SplitManager) -> Self {
        Self {
            pane_ids: manager.pane_ids(),
            active: manager.active_pane_id(),
            pane_count: manager.pane_count(),
            layout: manager.layout(),
        }
    }
}

// ============================================================================
// Property 1: Tree and Registry Agreement
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After every operation the tree and the registry describe the same
    /// set of panes, each pane appears once, and exactly one is active.
    #[test]
    fn prop_tree_and_registry_agree(ops in operations_strategy(12)) {
        let mut manager = workspace();

        for op in &ops {
            apply_operation(&mut manager, op);

            let ids = manager.pane_ids();
            prop_assert_eq!(
                ids.len(),
                manager.pane_count(),
                "tree and registry disagree on pane count"
            );

            let unique: HashSet<PaneId> = ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), ids.len(), "tree lists a pane twice");

            for id in &ids {
                prop_assert!(
                    manager.contains_pane(*id),
                    "tree pane {} is missing from the registry",
                    id
                );
            }

            let active = manager.active_pane_id();
            prop_assert!(active.is_some(), "workspace lost its active pane");
            prop_assert!(
                ids.contains(&active.unwrap()),
                "active pane is not in the tree"
            );
        }
    }

    /// The same operation sequence applied to two fresh workspaces produces
    /// identical trees, activation and geometry.
    #[test]
    fn prop_operations_are_deterministic(ops in operations_strategy(12)) {
        let mut first = workspace();
        let mut second = workspace();

        for op in &ops {
            apply_operation(&mut first, op);
            apply_operation(&mut second, op);
        }

        prop_assert_eq!(
            WorkspaceSnapshot::capture(&first),
            WorkspaceSnapshot::capture(&second),
            "identical operation sequences diverged"
        );
    }
}

// ============================================================================
// Property 2: Pane Identity
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Pane ids are minted monotonically and never reused, so a stale id
    /// held across a close can never address a later pane.
    #[test]
    fn prop_pane_ids_are_never_reused(ops in operations_strategy(12)) {
        let mut manager = workspace();
        let mut seen: HashSet<PaneId> = manager.pane_ids().into_iter().collect();
        let mut highest = *seen.iter().max().unwrap();

        for op in &ops {
            if let Some(minted) = apply_operation(&mut manager, op) {
                prop_assert!(
                    minted > highest,
                    "minted id {} does not exceed the previous high {}",
                    minted,
                    highest
                );
                prop_assert!(seen.insert(minted), "id {} was minted twice", minted);
                highest = minted;
            }
        }
    }

    /// Reset collapses any workspace to a single fresh pane whose id
    /// continues the mint sequence.
    #[test]
    fn prop_reset_starts_over_with_a_fresh_id(ops in operations_strategy(12)) {
        let mut manager = workspace();
        let mut highest = manager.pane_ids()[0];
        for op in &ops {
            if let Some(minted) = apply_operation(&mut manager, op) {
                highest = minted;
            }
        }

        let fresh = manager.reset();

        prop_assert_eq!(manager.pane_count(), 1);
        prop_assert_eq!(manager.active_pane_id(), Some(fresh));
        prop_assert!(fresh > highest, "reset reused id space at or below {}", highest);
    }
}

// ============================================================================
// Property 3: Close Behavior
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The last pane always survives: however the workspace got there,
    /// closing a single remaining pane is refused and leaves it active.
    #[test]
    fn prop_last_pane_survives(ops in operations_strategy(12)) {
        let mut manager = workspace();
        for op in &ops {
            apply_operation(&mut manager, op);
        }

        while manager.pane_count() > 1 {
            let target = manager.pane_ids()[0];
            prop_assert!(manager.close_pane(target).is_ok());
        }

        let survivor = manager.pane_ids()[0];
        let result = manager.close_pane(survivor);
        prop_assert!(
            matches!(result, Err(SplitError::CannotCloseLastPane)),
            "single-pane close was not refused"
        );
        prop_assert_eq!(manager.pane_count(), 1);
        prop_assert_eq!(manager.active_pane_id(), Some(survivor));
    }

    /// Closing the active pane hands activation to the first pane in tree
    /// order; closing a background pane leaves activation alone.
    #[test]
    fn prop_close_activation_rule(
        ops in operations_strategy(10),
        close_index in 0usize..8,
    ) {
        let mut manager = workspace();
        for op in &ops {
            apply_operation(&mut manager, op);
        }
        ensure_two_panes(&mut manager);

        let ids = manager.pane_ids();
        let target = ids[close_index % ids.len()];
        let active_before = manager.active_pane_id();
        let was_active = active_before == Some(target);

        manager.close_pane(target).unwrap();

        if was_active {
            prop_assert_eq!(
                manager.active_pane_id(),
                manager.pane_ids().first().copied(),
                "closing the active pane did not activate the first pane in tree order"
            );
        } else {
            prop_assert_eq!(
                manager.active_pane_id(),
                active_before,
                "closing a background pane moved activation"
            );
        }
    }
}

// ============================================================================
// Property 4: Layout Geometry
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every live pane gets exactly one rectangle, dividers number one
    /// fewer than panes, and the rectangles together tile the viewport.
    #[test]
    fn prop_layout_tiles_viewport(ops in operations_strategy(12)) {
        let mut manager = workspace();
        for op in &ops {
            apply_operation(&mut manager, op);
        }

        let layout = manager.layout().unwrap();
        let ids = manager.pane_ids();

        prop_assert_eq!(layout.panes.len(), ids.len());
        prop_assert_eq!(layout.dividers.len(), ids.len() - 1);
        for id in &ids {
            prop_assert!(layout.pane_rect(*id).is_some(), "pane {} has no rectangle", id);
        }

        for pane in &layout.panes {
            prop_assert!(
                pane.rect.width >= 0.0 && pane.rect.height >= 0.0,
                "pane {} was assigned a negative extent",
                pane.pane
            );
        }

        let area: f64 = layout
            .panes
            .iter()
            .map(|p| p.rect.width * p.rect.height)
            .sum();
        let viewport_area = VIEWPORT_WIDTH * VIEWPORT_HEIGHT;
        prop_assert!(
            (area - viewport_area).abs() < 1e-6 * viewport_area,
            "pane areas sum to {} instead of the viewport's {}",
            area,
            viewport_area
        );
    }

    /// A one-shot divider move clamps so both neighbors keep the minimum
    /// extent; a branch too small for two minimums does not move at all.
    #[test]
    fn prop_resize_honors_minimum_extent(
        ops in operations_strategy(10),
        branch_index in 0usize..8,
        delta in -3000.0f64..3000.0,
    ) {
        let mut manager = workspace();
        for op in &ops {
            apply_operation(&mut manager, op);
        }
        ensure_two_panes(&mut manager);

        let before = manager.layout().unwrap();
        let divider_before = before.dividers[branch_index % before.dividers.len()];
        let branch = divider_before.branch;

        manager.resize_by(branch, delta).unwrap();

        let after = manager.layout().unwrap();
        let divider_after = after.divider(branch).unwrap();
        let min = manager.min_extent();
        let total = divider_before.first_extent + divider_before.second_extent;

        if total > 2.0 * min {
            prop_assert!(
                divider_after.first_extent >= min - 1e-9,
                "first neighbor extent {} fell below the minimum {}",
                divider_after.first_extent,
                min
            );
            prop_assert!(
                divider_after.second_extent >= min - 1e-9,
                "second neighbor extent {} fell below the minimum {}",
                divider_after.second_extent,
                min
            );
        } else {
            prop_assert!(
                (divider_after.first_extent - divider_before.first_extent).abs() < 1e-9,
                "a branch too small for two minimum extents moved its divider"
            );
        }
    }
}

//! Pane tree structure for split layouts
//!
//! This module provides the binary tree structure used to represent
//! split-pane layouts. Each node is either a leaf (holding the id of a pane
//! whose body lives in the manager's registry) or a branch (holding two
//! children arranged in a direction).
//!
//! # Tree Structure
//!
//! ```text
//! Branch(Vertical)
//! ├── Leaf(Pane(1))
//! └── Branch(Horizontal)
//!     ├── Leaf(Pane(2))
//!     └── Leaf(Pane(3))
//! ```
//!
//! The tree supports arbitrary nesting depth. Children are owned boxes and
//! there are no parent pointers; removal promotes the sibling subtree in
//! place, so a branch can never survive with a single child.

use super::types::{BranchId, PaneId, SplitDirection};

/// Default split ratio (50% of available space).
pub const DEFAULT_SPLIT_RATIO: f64 = 0.5;

/// A node in the pane tree.
///
/// The pane tree is a binary tree where each node is either:
/// - A `Leaf` referencing a pane by id
/// - A `Branch` containing two child nodes arranged in a direction
#[derive(Debug, Clone, PartialEq)]
pub enum PaneNode {
    /// A leaf referencing a live pane.
    Leaf(PaneId),
    /// A branch containing two child nodes.
    Branch(BranchNode),
}

/// A branch node containing two children.
///
/// Branch nodes divide the available space between two child nodes,
/// arranged either horizontally (top/bottom) or vertically (left/right).
#[derive(Debug, Clone, PartialEq)]
pub struct BranchNode {
    /// Unique identifier for this branch, used to address its divider.
    pub id: BranchId,
    /// Split direction.
    pub direction: SplitDirection,
    /// First child (top for horizontal, left for vertical).
    pub first: Box<PaneNode>,
    /// Second child (bottom for horizontal, right for vertical).
    pub second: Box<PaneNode>,
    /// Split ratio in (0.0, 1.0): the share of space given to the first child.
    pub ratio: f64,
}

impl BranchNode {
    /// Creates a new branch with the given direction and children.
    ///
    /// Uses the default split ratio (0.5).
    #[must_use]
    pub fn new(id: BranchId, direction: SplitDirection, first: PaneNode, second: PaneNode) -> Self {
        Self {
            id,
            direction,
            first: Box::new(first),
            second: Box::new(second),
            ratio: DEFAULT_SPLIT_RATIO,
        }
    }
}

impl PaneNode {
    /// Creates a new leaf node referencing the given pane.
    #[must_use]
    pub const fn leaf(pane_id: PaneId) -> Self {
        Self::Leaf(pane_id)
    }

    /// Returns true if this is a leaf node.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns true if this is a branch node.
    #[must_use]
    pub const fn is_branch(&self) -> bool {
        matches!(self, Self::Branch(_))
    }

    /// Returns the pane id if this is a leaf node.
    #[must_use]
    pub const fn as_leaf(&self) -> Option<PaneId> {
        match self {
            Self::Leaf(id) => Some(*id),
            Self::Branch(_) => None,
        }
    }

    /// Returns the branch node if this is a branch node.
    #[must_use]
    pub const fn as_branch(&self) -> Option<&BranchNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(branch) => Some(branch),
        }
    }

    /// Returns a mutable reference to the branch node if this is a branch.
    #[must_use]
    pub fn as_branch_mut(&mut self) -> Option<&mut BranchNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(branch) => Some(branch),
        }
    }

    // ========================================================================
    // Tree Traversal Methods
    // ========================================================================

    /// Finds a branch by its id.
    #[must_use]
    pub fn find_branch(&self, branch_id: BranchId) -> Option<&BranchNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(branch) => {
                if branch.id == branch_id {
                    Some(branch)
                } else {
                    branch
                        .first
                        .find_branch(branch_id)
                        .or_else(|| branch.second.find_branch(branch_id))
                }
            }
        }
    }

    /// Finds a branch by its id and returns a mutable reference.
    #[must_use]
    pub fn find_branch_mut(&mut self, branch_id: BranchId) -> Option<&mut BranchNode> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(branch) => {
                if branch.id == branch_id {
                    Some(branch)
                } else if let Some(found) = branch.first.find_branch_mut(branch_id) {
                    Some(found)
                } else {
                    branch.second.find_branch_mut(branch_id)
                }
            }
        }
    }

    /// Returns all pane ids in the tree.
    ///
    /// Traverses the tree depth-first, first child before second, which is
    /// the reading order panes are presented in.
    #[must_use]
    pub fn pane_ids(&self) -> Vec<PaneId> {
        let mut ids = Vec::new();
        self.collect_pane_ids(&mut ids);
        ids
    }

    fn collect_pane_ids(&self, ids: &mut Vec<PaneId>) {
        match self {
            Self::Leaf(id) => ids.push(*id),
            Self::Branch(branch) => {
                branch.first.collect_pane_ids(ids);
                branch.second.collect_pane_ids(ids);
            }
        }
    }

    /// Returns all branch ids in the tree, depth-first.
    #[must_use]
    pub fn branch_ids(&self) -> Vec<BranchId> {
        let mut ids = Vec::new();
        self.collect_branch_ids(&mut ids);
        ids
    }

    fn collect_branch_ids(&self, ids: &mut Vec<BranchId>) {
        if let Self::Branch(branch) = self {
            ids.push(branch.id);
            branch.first.collect_branch_ids(ids);
            branch.second.collect_branch_ids(ids);
        }
    }

    /// Returns the depth of the tree.
    ///
    /// A single leaf has depth 0. Each level of branches adds 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Branch(branch) => 1 + branch.first.depth().max(branch.second.depth()),
        }
    }

    /// Returns the total number of leaves in the tree.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => branch.first.pane_count() + branch.second.pane_count(),
        }
    }

    /// Returns true if the tree contains a leaf with the given pane id.
    #[must_use]
    pub fn contains_pane(&self, pane_id: PaneId) -> bool {
        match self {
            Self::Leaf(id) => *id == pane_id,
            Self::Branch(branch) => {
                branch.first.contains_pane(pane_id) || branch.second.contains_pane(pane_id)
            }
        }
    }

    /// Returns the first pane in the tree (leftmost/topmost in reading order).
    #[must_use]
    pub fn first_pane(&self) -> PaneId {
        match self {
            Self::Leaf(id) => *id,
            Self::Branch(branch) => branch.first.first_pane(),
        }
    }

    // ========================================================================
    // Tree Mutation Methods
    // ========================================================================

    /// Splits a leaf in the given direction.
    ///
    /// The leaf referencing `target` is replaced by a branch containing:
    /// - First child: the original leaf
    /// - Second child: a new leaf referencing `new_pane`
    ///
    /// so repeated splits grow in reading order. The caller mints both
    /// `new_pane` and `branch` from its monotonic counters.
    ///
    /// Returns `true` if the target leaf was found and split.
    pub fn insert_split(
        &mut self,
        target: PaneId,
        direction: SplitDirection,
        new_pane: PaneId,
        branch: BranchId,
    ) -> bool {
        match self {
            Self::Leaf(id) => {
                if *id == target {
                    let original = *id;
                    *self = Self::Branch(BranchNode::new(
                        branch,
                        direction,
                        Self::Leaf(original),
                        Self::Leaf(new_pane),
                    ));
                    true
                } else {
                    false
                }
            }
            Self::Branch(node) => {
                node.first.insert_split(target, direction, new_pane, branch)
                    || node.second.insert_split(target, direction, new_pane, branch)
            }
        }
    }

    /// Sets the ratio of the branch with the given id.
    ///
    /// The ratio must be finite and strictly between 0.0 and 1.0; anything
    /// else leaves the tree untouched. Clamping pointer movement into this
    /// range is the resize interaction's job, not the tree's.
    ///
    /// Returns `true` if the branch was found and updated.
    pub fn set_ratio(&mut self, branch_id: BranchId, ratio: f64) -> bool {
        if !ratio.is_finite() || ratio <= 0.0 || ratio >= 1.0 {
            return false;
        }
        if let Some(branch) = self.find_branch_mut(branch_id) {
            branch.ratio = ratio;
            true
        } else {
            false
        }
    }

    /// Removes a leaf from the tree.
    ///
    /// When a leaf is removed:
    /// - If this node is the matching leaf itself, returns
    ///   `RemoveResult::RemovedSelf` so the caller can handle the root case
    /// - If the leaf is a direct child of a branch, the sibling subtree is
    ///   promoted in place of the branch, keeping its own internal structure
    ///   and ratios unchanged
    pub fn remove_pane(&mut self, pane_id: PaneId) -> RemoveResult {
        match self {
            Self::Leaf(id) => {
                if *id == pane_id {
                    RemoveResult::RemovedSelf
                } else {
                    RemoveResult::NotFound
                }
            }
            Self::Branch(branch) => {
                if branch.first.as_leaf() == Some(pane_id) {
                    // Remove first child, promote second. The placeholder leaf
                    // is discarded immediately; pane id 0 is never minted.
                    let second =
                        std::mem::replace(branch.second.as_mut(), Self::Leaf(PaneId::new(0)));
                    *self = second;
                    return RemoveResult::Removed;
                }

                if branch.second.as_leaf() == Some(pane_id) {
                    let first =
                        std::mem::replace(branch.first.as_mut(), Self::Leaf(PaneId::new(0)));
                    *self = first;
                    return RemoveResult::Removed;
                }

                match branch.first.remove_pane(pane_id) {
                    RemoveResult::NotFound => {}
                    result => return result,
                }

                branch.second.remove_pane(pane_id)
            }
        }
    }
}

/// Result of a pane removal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveResult {
    /// The pane was not found in the tree.
    NotFound,
    /// The pane was removed and the sibling subtree promoted.
    Removed,
    /// The pane was the root leaf itself; the caller decides what replaces it.
    RemovedSelf,
}

impl RemoveResult {
    /// Returns true if the pane was found and removed.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed | Self::RemovedSelf)
    }
}

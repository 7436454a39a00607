//! Rectangle geometry for split layouts
//!
//! This module turns a pane tree plus a viewport rectangle into concrete
//! per-pane rectangles and divider line segments. The same computation feeds
//! the resize clamp (which needs the two extents adjacent to a divider) and
//! any presentation layer (which needs where to draw panes and dividers).
//!
//! Coordinates are abstract layout units, not pixels; the host maps them to
//! its own device space.

use super::tree::PaneNode;
use super::types::{BranchId, PaneId, SplitDirection};

/// An axis-aligned rectangle in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, non-negative.
    pub width: f64,
    /// Height, non-negative.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from position and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the extent along the axis a branch of `direction` divides.
    ///
    /// Vertical branches divide width, horizontal branches divide height.
    #[must_use]
    pub const fn extent_along(&self, direction: SplitDirection) -> f64 {
        match direction {
            SplitDirection::Horizontal => self.height,
            SplitDirection::Vertical => self.width,
        }
    }

    /// Returns true if the point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    fn split(&self, direction: SplitDirection, ratio: f64) -> (Self, Self) {
        match direction {
            SplitDirection::Horizontal => {
                let first_height = self.height * ratio;
                let first = Self::new(self.x, self.y, self.width, first_height);
                let second = Self::new(
                    self.x,
                    self.y + first_height,
                    self.width,
                    self.height - first_height,
                );
                (first, second)
            }
            SplitDirection::Vertical => {
                let first_width = self.width * ratio;
                let first = Self::new(self.x, self.y, first_width, self.height);
                let second = Self::new(
                    self.x + first_width,
                    self.y,
                    self.width - first_width,
                    self.height,
                );
                (first, second)
            }
        }
    }
}

/// The rectangle assigned to one pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneRect {
    /// The pane this rectangle belongs to.
    pub pane: PaneId,
    /// Its assigned rectangle.
    pub rect: Rect,
}

/// One divider line segment between a branch's children.
///
/// A vertical branch has a vertical divider at the boundary between left and
/// right; a horizontal branch a horizontal one between top and bottom. The
/// child extents along the branch axis are carried so the resize interaction
/// can clamp without re-walking the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    /// The branch this divider belongs to.
    pub branch: BranchId,
    /// The branch direction.
    pub direction: SplitDirection,
    /// Line origin x.
    pub x: f64,
    /// Line origin y.
    pub y: f64,
    /// Line length across the branch axis.
    pub length: f64,
    /// First child's extent along the branch axis.
    pub first_extent: f64,
    /// Second child's extent along the branch axis.
    pub second_extent: f64,
}

impl Divider {
    /// The divider's coordinate along the branch axis (x for vertical
    /// branches, y for horizontal ones).
    #[must_use]
    pub const fn axis_position(&self) -> f64 {
        match self.direction {
            SplitDirection::Horizontal => self.y,
            SplitDirection::Vertical => self.x,
        }
    }
}

/// Computed layout: every pane's rectangle and every branch's divider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// Pane rectangles in reading order.
    pub panes: Vec<PaneRect>,
    /// Divider segments, depth-first.
    pub dividers: Vec<Divider>,
}

impl Layout {
    /// Computes the layout of `root` within `viewport`.
    #[must_use]
    pub fn compute(root: &PaneNode, viewport: Rect) -> Self {
        let mut layout = Self::default();
        layout.walk(root, viewport);
        layout
    }

    fn walk(&mut self, node: &PaneNode, rect: Rect) {
        match node {
            PaneNode::Leaf(id) => self.panes.push(PaneRect {
                pane: *id,
                rect,
            }),
            PaneNode::Branch(branch) => {
                let (first_rect, second_rect) = rect.split(branch.direction, branch.ratio);

                let divider = match branch.direction {
                    SplitDirection::Horizontal => Divider {
                        branch: branch.id,
                        direction: branch.direction,
                        x: rect.x,
                        y: rect.y + first_rect.height,
                        length: rect.width,
                        first_extent: first_rect.height,
                        second_extent: second_rect.height,
                    },
                    SplitDirection::Vertical => Divider {
                        branch: branch.id,
                        direction: branch.direction,
                        x: rect.x + first_rect.width,
                        y: rect.y,
                        length: rect.height,
                        first_extent: first_rect.width,
                        second_extent: second_rect.width,
                    },
                };
                self.dividers.push(divider);

                self.walk(&branch.first, first_rect);
                self.walk(&branch.second, second_rect);
            }
        }
    }

    /// Returns the rectangle assigned to a pane, if the pane is in the layout.
    #[must_use]
    pub fn pane_rect(&self, pane: PaneId) -> Option<Rect> {
        self.panes.iter().find(|p| p.pane == pane).map(|p| p.rect)
    }

    /// Returns the divider belonging to a branch.
    #[must_use]
    pub fn divider(&self, branch: BranchId) -> Option<&Divider> {
        self.dividers.iter().find(|d| d.branch == branch)
    }

    /// Hit-tests a point against the dividers.
    ///
    /// Returns the branch whose divider lies within `tolerance` units of the
    /// point, measured perpendicular to the line. The first match in
    /// depth-first order wins, which prefers outer dividers at shared corners.
    #[must_use]
    pub fn divider_at(&self, x: f64, y: f64, tolerance: f64) -> Option<BranchId> {
        self.dividers
            .iter()
            .find(|d| match d.direction {
                SplitDirection::Horizontal => {
                    (y - d.y).abs() <= tolerance && x >= d.x && x <= d.x + d.length
                }
                SplitDirection::Vertical => {
                    (x - d.x).abs() <= tolerance && y >= d.y && y <= d.y + d.length
                }
            })
            .map(|d| d.branch)
    }
}

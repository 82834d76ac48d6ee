use crate::Coord;

/// Location of a node is determined by its `idx` in the [`NodeArena`](super::NodeArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) struct NodeIdx(pub(super) u32);

/// Inclusive axis-aligned region `[x0, x1] x [y0, y1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl Region {
    #[inline]
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    #[inline]
    pub fn contains(&self, pos: Coord) -> bool {
        self.x0 <= pos.x && pos.x <= self.x1 && self.y0 <= pos.y && pos.y <= self.y1
    }

    /// A region of exactly one cell.
    #[inline]
    pub fn is_cell(&self) -> bool {
        self.x0 == self.x1 && self.y0 == self.y1
    }

    /// Top-left corner of the region.
    #[inline]
    pub fn origin(&self) -> Coord {
        Coord::new(self.x0, self.y0)
    }

    /// Splits the region into the four child slots, in this fixed order:
    /// top-left, bottom-left, bottom-right, top-right.
    ///
    /// The split point is `h = (x1 - x0) / 2`, applied to both axes, so the
    /// left and top halves are `h + 1` cells wide.
    pub fn quadrants(&self) -> [Region; 4] {
        let Self { x0, y0, x1, y1 } = *self;
        let h = x1.saturating_sub(x0) / 2;
        [
            Self::new(x0, y0, x0 + h, y0 + h),
            Self::new(x0, y0 + h + 1, x0 + h, y1),
            Self::new(x0 + h + 1, y0 + h + 1, x1, y1),
            Self::new(x0 + h + 1, y0, x1, y0 + h),
        ]
    }

    /// Index of the child slot whose quadrant spans `pos`.
    #[inline]
    pub fn quadrant_of(&self, pos: Coord) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        self.quadrants().iter().position(|q| q.contains(pos))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum NodeKind {
    Root,
    /// Spans more than one cell and has at least one live descendant
    /// (unless pruning is deferred).
    Branch,
    /// Spans exactly one cell; its existence means the cell is alive.
    Leaf,
}

/// A node of the quadtree. Absent children are empty quadrants.
#[derive(Clone, Debug)]
pub(super) struct QuadTreeNode {
    pub(super) region: Region,
    /// `None` only for the root
    pub(super) parent: Option<NodeIdx>,
    pub(super) children: [Option<NodeIdx>; 4],
    pub(super) kind: NodeKind,
    pub(super) depth: u32,
    /// false once the arena slot has been released
    pub(super) is_used: bool,
}

impl QuadTreeNode {
    pub(super) fn root(region: Region) -> Self {
        Self {
            region,
            parent: None,
            children: [None; 4],
            kind: NodeKind::Root,
            depth: 0,
            is_used: true,
        }
    }

    pub(super) fn child(parent: NodeIdx, parent_depth: u32, region: Region) -> Self {
        Self {
            region,
            parent: Some(parent),
            children: [None; 4],
            kind: if region.is_cell() {
                NodeKind::Leaf
            } else {
                NodeKind::Branch
            },
            depth: parent_depth + 1,
            is_used: true,
        }
    }

    #[inline]
    pub(super) fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    /// Slot of `child` in `self.children`.
    pub(super) fn slot_of(&self, child: NodeIdx) -> Option<usize> {
        self.children.iter().position(|&c| c == Some(child))
    }
}

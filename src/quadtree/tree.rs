use super::{NodeArena, NodeIdx, NodeKind, QuadTreeNode, Region};
use crate::{Bounds, CellSet, Coord};
use anyhow::{anyhow, ensure, Result};

/// Largest supported side length is `2^MAX_SIDE_LOG2`, so that every
/// coordinate of the region and every split point fits into `u32`.
const MAX_SIDE_LOG2: u32 = 31;

/// When branches left without live cells are removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrunePolicy {
    /// Every removal walks back up and drops the branches it emptied, so a
    /// branch always has at least one live descendant.
    #[default]
    Eager,
    /// Empty branches stay allocated until [`QuadTree::prune`] is called.
    /// Later inserts into the same area reuse them.
    Deferred,
}

/// Outcome of [`QuadTree::insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    Inserted,
    AlreadyPresent,
    /// The point lies outside of the root region; nothing was changed.
    OutOfRegion,
}

/// Outcome of [`QuadTree::remove`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    Removed,
    NotFound,
}

/// Result of a full walk over the tree.
#[derive(Clone, Debug, Default)]
pub struct Traversal {
    /// Coordinates of all leaves, i.e. all live cells.
    pub cells: CellSet,
    /// Depth of the deepest leaf (the root has depth 0), zero for an empty tree.
    pub max_depth: u32,
    /// Number of nodes visited, the root included.
    pub nodes: usize,
}

/// Region quadtree that stores only live cells.
///
/// The root spans a square of side `2^k`. A live cell is a leaf node whose
/// region is that single cell; every node on the way from the root to it
/// spans one quadrant of its parent. Quadrants without live cells are not
/// allocated, so memory follows the population and its spread rather than
/// the area of the field.
///
/// # Example
///
/// ```rust
/// use gol_boards::{Coord, Insertion, QuadTree, Removal};
///
/// let mut tree = QuadTree::new(4).unwrap(); // 16x16
/// assert_eq!(tree.insert(Coord::new(5, 8)), Insertion::Inserted);
/// assert_eq!(tree.insert(Coord::new(5, 8)), Insertion::AlreadyPresent);
/// assert_eq!(tree.insert(Coord::new(16, 0)), Insertion::OutOfRegion);
/// assert!(tree.contains(Coord::new(5, 8)));
///
/// assert_eq!(tree.remove(Coord::new(5, 8)), Removal::Removed);
/// assert_eq!(tree.remove(Coord::new(5, 8)), Removal::NotFound);
/// assert!(tree.is_empty());
/// assert_eq!(tree.node_count(), 1); // only the root is left
/// ```
pub struct QuadTree {
    arena: NodeArena,
    root: NodeIdx,
    side_log2: u32,
    policy: PrunePolicy,
    /// number of leaves
    len: usize,
}

impl QuadTree {
    /// Creates an empty tree over `[0, 2^side_log2)` on both axes.
    ///
    /// # Errors
    ///
    /// Returns an error if `side_log2` exceeds 31.
    pub fn new(side_log2: u32) -> Result<Self> {
        if side_log2 > MAX_SIDE_LOG2 {
            return Err(anyhow!(
                "Quadtree side 2^{} is too large, at most 2^{} is supported",
                side_log2,
                MAX_SIDE_LOG2
            ));
        }
        let max = ((1u64 << side_log2) - 1) as u32;
        let mut arena = NodeArena::new();
        let root = arena.allocate(QuadTreeNode::root(Region::new(0, 0, max, max)));
        Ok(Self {
            arena,
            root,
            side_log2,
            policy: PrunePolicy::default(),
            len: 0,
        })
    }

    /// Creates the smallest tree whose square region covers `bounds`.
    ///
    /// # Errors
    ///
    /// Returns an error if the larger dimension exceeds `2^31`.
    pub fn covering(bounds: Bounds) -> Result<Self> {
        let side = bounds
            .width
            .max(bounds.height)
            .max(1)
            .checked_next_power_of_two()
            .ok_or_else(|| {
                anyhow!(
                    "Field {}x{} is too large for a quadtree",
                    bounds.width,
                    bounds.height
                )
            })?;
        Self::new(side.ilog2())
    }

    pub fn with_policy(mut self, policy: PrunePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> PrunePolicy {
        self.policy
    }

    /// Region spanned by the root.
    pub fn region(&self) -> Region {
        self.arena[self.root].region
    }

    pub fn side_log2(&self) -> u32 {
        self.side_log2
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns the approximate heap memory usage of the tree in bytes.
    pub fn bytes_total(&self) -> usize {
        self.arena.bytes_total()
    }

    /// Marks `pos` as alive.
    ///
    /// Descends through the quadrants that already exist; from the first
    /// missing one down to the single-cell leaf, only the quadrant spanning
    /// `pos` is allocated at each level.
    pub fn insert(&mut self, pos: Coord) -> Insertion {
        if !self.region().contains(pos) {
            return Insertion::OutOfRegion;
        }

        let mut idx = self.root;
        loop {
            let node = &self.arena[idx];
            if node.kind == NodeKind::Leaf {
                return Insertion::AlreadyPresent;
            }
            let slot = Self::slot_for(node, pos);
            match node.children[slot] {
                Some(child) => idx = child,
                None => break,
            }
        }

        loop {
            let node = &self.arena[idx];
            let slot = Self::slot_for(node, pos);
            let child = QuadTreeNode::child(idx, node.depth, node.region.quadrants()[slot]);
            let is_leaf = child.kind == NodeKind::Leaf;
            let child = self.arena.allocate(child);
            self.arena[idx].children[slot] = Some(child);
            if is_leaf {
                self.len += 1;
                return Insertion::Inserted;
            }
            idx = child;
        }
    }

    /// Marks `pos` as dead by unlinking its leaf from the parent.
    ///
    /// With [`PrunePolicy::Eager`] every ancestor left without children is
    /// released as well, up to (but never including) the root.
    pub fn remove(&mut self, pos: Coord) -> Removal {
        if !self.region().contains(pos) {
            return Removal::NotFound;
        }

        let mut idx = self.root;
        loop {
            let node = &self.arena[idx];
            let slot = Self::slot_for(node, pos);
            let Some(child) = node.children[slot] else {
                return Removal::NotFound;
            };
            if self.arena[child].kind == NodeKind::Leaf {
                self.arena[idx].children[slot] = None;
                self.arena.release(child);
                self.len -= 1;
                if self.policy == PrunePolicy::Eager {
                    self.prune_upwards(idx);
                }
                return Removal::Removed;
            }
            idx = child;
        }
    }

    /// Whether `pos` is alive, found by following the unique chain of
    /// regions that contain it.
    pub fn contains(&self, pos: Coord) -> bool {
        let mut idx = self.root;
        loop {
            let node = &self.arena[idx];
            if node.kind == NodeKind::Leaf {
                return true;
            }
            let Some(slot) = node.region.quadrant_of(pos) else {
                return false;
            };
            match node.children[slot] {
                Some(child) => idx = child,
                None => return false,
            }
        }
    }

    /// Walks the whole tree and returns a fresh set of its leaves.
    pub fn traverse(&self) -> Traversal {
        let mut result = Traversal {
            cells: CellSet::with_capacity(self.len),
            ..Default::default()
        };
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            let node = &self.arena[idx];
            result.nodes += 1;
            if node.kind == NodeKind::Leaf {
                result.cells.insert(node.region.origin());
                result.max_depth = result.max_depth.max(node.depth);
            } else {
                stack.extend(node.children.iter().flatten().copied());
            }
        }
        result
    }

    /// Releases every branch without live descendants.
    ///
    /// Returns the number of live cells. Under [`PrunePolicy::Eager`] there
    /// is never anything to release.
    pub fn prune(&mut self) -> usize {
        fn inner(tree: &mut QuadTree, idx: NodeIdx) -> usize {
            if tree.arena[idx].kind == NodeKind::Leaf {
                return 1;
            }
            let mut leaves = 0;
            for slot in 0..4 {
                let Some(child) = tree.arena[idx].children[slot] else {
                    continue;
                };
                let below = inner(tree, child);
                if below == 0 {
                    // all of its own children were released by the call above
                    tree.arena[idx].children[slot] = None;
                    tree.arena.release(child);
                }
                leaves += below;
            }
            leaves
        }

        let root = self.root;
        inner(self, root)
    }

    /// Verifies the structural invariants of the tree.
    ///
    /// # Errors
    ///
    /// Returns a description of the first broken invariant: a child that
    /// does not link back to its parent, a region that is not the matching
    /// quadrant of its parent, a leaf wider than one cell, an empty branch
    /// under eager pruning, a stale leaf counter or an unreachable node.
    pub fn check_integrity(&self) -> Result<()> {
        let root = &self.arena[self.root];
        ensure!(root.kind == NodeKind::Root, "root has kind {:?}", root.kind);
        ensure!(root.parent.is_none(), "root has a parent");

        let (mut reachable, mut leaves) = (0, 0);
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            reachable += 1;
            let node = &self.arena[idx];
            match node.kind {
                NodeKind::Root => ensure!(idx == self.root, "second root at {}", idx.0),
                NodeKind::Leaf => {
                    ensure!(node.region.is_cell(), "leaf {:?} spans several cells", node.region);
                    ensure!(!node.has_children(), "leaf {:?} has children", node.region);
                    leaves += 1;
                }
                NodeKind::Branch => {
                    ensure!(!node.region.is_cell(), "branch {:?} spans one cell", node.region);
                    ensure!(
                        self.policy == PrunePolicy::Deferred || node.has_children(),
                        "branch {:?} has no live descendants",
                        node.region
                    );
                }
            }

            let quadrants = node.region.quadrants();
            for (slot, child) in node.children.iter().enumerate() {
                let Some(child) = *child else {
                    continue;
                };
                ensure!(self.arena.is_used(child), "link to released node {}", child.0);
                let c = &self.arena[child];
                ensure!(c.parent == Some(idx), "node {:?} has a wrong parent", c.region);
                ensure!(
                    c.region == quadrants[slot],
                    "node {:?} is not quadrant {} of {:?}",
                    c.region,
                    slot,
                    node.region
                );
                ensure!(c.depth == node.depth + 1, "node {:?} has a wrong depth", c.region);
                ensure!(
                    self.arena[idx].slot_of(child) == Some(slot),
                    "node {:?} is linked twice",
                    c.region
                );
                stack.push(child);
            }
        }

        ensure!(
            leaves == self.len,
            "{} leaves found, {} recorded",
            leaves,
            self.len
        );
        ensure!(
            reachable == self.arena.len(),
            "{} nodes reachable, {} allocated",
            reachable,
            self.arena.len()
        );
        Ok(())
    }

    #[inline]
    fn slot_for(node: &QuadTreeNode, pos: Coord) -> usize {
        node.region
            .quadrant_of(pos)
            .expect("quadrants cover the region of their parent")
    }

    /// Starting at `idx`, releases nodes that have no children left.
    fn prune_upwards(&mut self, mut idx: NodeIdx) {
        // the root has no parent and is never released
        while let Some(parent) = self.arena[idx].parent {
            if self.arena[idx].has_children() {
                break;
            }
            let slot = self.arena[parent]
                .slot_of(idx)
                .expect("parent links its child");
            self.arena[parent].children[slot] = None;
            self.arena.release(idx);
            idx = parent;
        }
    }
}

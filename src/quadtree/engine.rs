use super::{Insertion, QuadTree, Removal};
use crate::sparse::{Fate, NeighborTally};
use crate::traits::validate_cells;
use crate::{Bounds, CellSet, Coord, GoLEngine, RuleTable};
use anyhow::Result;

/// Engine that keeps live cells as the leaves of a [`QuadTree`].
///
/// The tree covers the field with the smallest power-of-two square; neighbor
/// counting uses the field itself, so cells in the padding never come to
/// life. Each update tallies the traversed leaves and then applies births as
/// inserts and deaths as removals, leaving survivors untouched.
pub struct QuadTreeEngine {
    bounds: Bounds,
    rules: RuleTable,
    tree: QuadTree,
}

impl QuadTreeEngine {
    /// Creates an engine over an already configured tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree does not cover `bounds` or is not empty.
    pub fn with_tree(bounds: Bounds, rules: RuleTable, tree: QuadTree) -> Result<Self> {
        let region = tree.region();
        anyhow::ensure!(
            (bounds.width as u64) <= region.x1 as u64 + 1
                && (bounds.height as u64) <= region.y1 as u64 + 1,
            "Quadtree region {:?} does not cover the {}x{} field",
            region,
            bounds.width,
            bounds.height
        );
        anyhow::ensure!(tree.is_empty(), "Quadtree must be empty");
        Ok(Self {
            bounds,
            rules,
            tree,
        })
    }

    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// Releases branches left empty under [`PrunePolicy::Deferred`](super::PrunePolicy::Deferred).
    pub fn prune(&mut self) -> usize {
        self.tree.prune()
    }
}

impl GoLEngine for QuadTreeEngine {
    /// # Panics
    ///
    /// Panics if the field is wider or taller than `2^31`;
    /// [`Board`](crate::Board) rejects such sizes beforehand.
    fn new(bounds: Bounds, rules: RuleTable) -> Self {
        Self {
            bounds,
            rules,
            tree: QuadTree::covering(bounds).expect("Field is too large for a quadtree"),
        }
    }

    fn load_cells(&mut self, cells: &[Coord]) -> Result<()> {
        validate_cells(self.bounds, cells)?;
        for &pos in cells {
            self.tree.insert(pos);
        }
        Ok(())
    }

    fn update(&mut self) -> bool {
        let tally = NeighborTally::new(self.tree.traverse().cells, self.bounds);
        for (pos, fate) in tally.fates(&self.rules) {
            match fate {
                Fate::Survives => {}
                Fate::Born => {
                    let outcome = self.tree.insert(pos);
                    assert_eq!(outcome, Insertion::Inserted, "birth of ({}, {})", pos.x, pos.y);
                }
                Fate::Dies => {
                    let outcome = self.tree.remove(pos);
                    assert_eq!(outcome, Removal::Removed, "death of ({}, {})", pos.x, pos.y);
                }
            }
        }
        !self.tree.is_empty()
    }

    fn living_cells(&self) -> CellSet {
        self.tree.traverse().cells
    }

    fn is_alive(&self, pos: Coord) -> bool {
        self.bounds.contains(pos) && self.tree.contains(pos)
    }

    fn population(&self) -> usize {
        self.tree.len()
    }

    fn bytes_total(&self) -> usize {
        self.tree.bytes_total()
    }
}

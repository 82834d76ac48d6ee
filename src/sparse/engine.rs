use super::tally::next_generation;
use crate::traits::validate_cells;
use crate::{Bounds, CellSet, Coord, GoLEngine, RuleTable};
use anyhow::Result;

/// Engine that stores only the set of live cells.
///
/// An update tallies neighbor counts around live cells and builds a fresh
/// set for the next generation, so its cost follows the population rather
/// than the size of the field.
///
/// # Example
///
/// ```rust
/// use gol_boards::{Bounds, Coord, GoLEngine, RuleTable, SparseEngine};
///
/// let mut engine = SparseEngine::new(Bounds::new(5, 5), RuleTable::CONWAY);
/// // horizontal blinker
/// let blinker = [Coord::new(1, 2), Coord::new(2, 2), Coord::new(3, 2)];
/// engine.load_cells(&blinker).unwrap();
///
/// assert!(engine.update());
/// assert!(engine.is_alive(Coord::new(2, 1)));
/// assert!(engine.is_alive(Coord::new(2, 3)));
/// assert!(!engine.is_alive(Coord::new(1, 2)));
/// ```
pub struct SparseEngine {
    bounds: Bounds,
    rules: RuleTable,
    living: CellSet,
}

impl GoLEngine for SparseEngine {
    fn new(bounds: Bounds, rules: RuleTable) -> Self {
        Self {
            bounds,
            rules,
            living: CellSet::new(),
        }
    }

    fn load_cells(&mut self, cells: &[Coord]) -> Result<()> {
        validate_cells(self.bounds, cells)?;
        self.living.extend(cells.iter().copied());
        Ok(())
    }

    fn update(&mut self) -> bool {
        self.living = next_generation(self.living.iter().copied(), self.bounds, &self.rules);
        !self.living.is_empty()
    }

    fn living_cells(&self) -> CellSet {
        self.living.clone()
    }

    fn is_alive(&self, pos: Coord) -> bool {
        self.living.contains(&pos)
    }

    fn population(&self) -> usize {
        self.living.len()
    }

    fn bytes_total(&self) -> usize {
        self.living.capacity() * std::mem::size_of::<Coord>()
    }
}

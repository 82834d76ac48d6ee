use crate::traits::validate_cells;
use crate::{Bounds, CellSet, Coord, GoLEngine, RuleTable};
use anyhow::Result;

/// Reference engine that stores every cell of the field and rescans the
/// whole grid on each update. Its cost is pattern-oblivious.
///
/// Neighbor counts are looked up directly in the current grid, and the next
/// generation is written into a fresh grid that replaces the old one once
/// the scan is complete.
pub struct DenseEngine {
    bounds: Bounds,
    rules: RuleTable,
    /// Row-major cell states, `width * height` entries.
    cells: Vec<bool>,
}

impl DenseEngine {
    #[inline]
    fn index(&self, pos: Coord) -> usize {
        pos.y as usize * self.bounds.width as usize + pos.x as usize
    }

    fn count_live_neighbors(&self, pos: Coord) -> u8 {
        self.bounds
            .neighbors(pos)
            .filter(|&n| self.cells[self.index(n)])
            .count() as u8
    }
}

impl GoLEngine for DenseEngine {
    fn new(bounds: Bounds, rules: RuleTable) -> Self {
        Self {
            bounds,
            rules,
            cells: vec![false; bounds.area()],
        }
    }

    fn load_cells(&mut self, cells: &[Coord]) -> Result<()> {
        validate_cells(self.bounds, cells)?;
        for &pos in cells {
            let idx = self.index(pos);
            self.cells[idx] = true;
        }
        Ok(())
    }

    fn update(&mut self) -> bool {
        let next = self
            .bounds
            .cells()
            .map(|pos| {
                let alive = self.cells[self.index(pos)];
                self.rules.next_state(alive, self.count_live_neighbors(pos))
            })
            .collect::<Vec<bool>>();
        self.cells = next;
        self.cells.contains(&true)
    }

    fn living_cells(&self) -> CellSet {
        self.bounds
            .cells()
            .filter(|&pos| self.cells[self.index(pos)])
            .collect()
    }

    fn is_alive(&self, pos: Coord) -> bool {
        self.bounds.contains(pos) && self.cells[self.index(pos)]
    }

    fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    fn bytes_total(&self) -> usize {
        self.cells.capacity() * std::mem::size_of::<bool>()
    }
}

use crate::{Bounds, CellSet, Coord, RuleTable};
use anyhow::Result;

/// Game engine for a bounded Game of Life board.
///
/// Every representation of the board implements this trait, so a
/// [`Board`](crate::Board) can hold any of them behind a `Box<dyn GoLEngine>`
/// and callers never observe which one is active.
pub trait GoLEngine {
    /// Creates an engine with a blank field of the given size.
    ///
    /// # Parameters
    /// * `bounds` - Size of the field; cells outside of it are always dead
    /// * `rules` - Birth/survival rule applied on every update
    fn new(bounds: Bounds, rules: RuleTable) -> Self
    where
        Self: Sized;

    /// Brings the given cells to life. Cells that are already alive are
    /// not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell lies outside of the field or if the same
    /// cell is listed twice. The field is left unchanged in that case.
    fn load_cells(&mut self, cells: &[Coord]) -> Result<()>;

    /// Advances the field by a single generation.
    ///
    /// # Returns
    ///
    /// `true` if at least one cell is alive after the update.
    ///
    /// # Panics
    ///
    /// Panics if the engine detects that its internal representations went
    /// out of sync, which can only be caused by a bug in the engine.
    fn update(&mut self) -> bool;

    /// Returns the current live cells.
    fn living_cells(&self) -> CellSet;

    /// Returns whether the cell is alive; cells outside of the field are dead.
    fn is_alive(&self, pos: Coord) -> bool;

    /// Number of live cells.
    fn population(&self) -> usize;

    /// Returns the approximate heap memory usage of the engine in bytes.
    fn bytes_total(&self) -> usize;
}

/// Checks a batch of cells before it is loaded into an engine.
pub(crate) fn validate_cells(bounds: Bounds, cells: &[Coord]) -> Result<()> {
    let mut seen = CellSet::with_capacity(cells.len());
    for &pos in cells {
        if !bounds.contains(pos) {
            return Err(anyhow::anyhow!(
                "Cell ({}, {}) lies outside of the {}x{} field",
                pos.x,
                pos.y,
                bounds.width,
                bounds.height
            ));
        }
        if !seen.insert(pos) {
            return Err(anyhow::anyhow!(
                "Cell ({}, {}) is listed more than once",
                pos.x,
                pos.y
            ));
        }
    }
    Ok(())
}

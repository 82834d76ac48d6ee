use ahash::AHashSet;
use std::cmp::Ordering;

/// The set of live cells of a board. Iteration order carries no meaning.
pub type CellSet = AHashSet<Coord>;

/// Position of a single cell on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Moore neighborhood offsets, row by row, without the centre.
    const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
        (-1, -1),
        (0, -1),
        (1, -1),
        (-1, 0),
        (1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
    ];

    #[inline]
    fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl From<(u32, u32)> for Coord {
    #[inline]
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl PartialOrd for Coord {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major: y first, then x
        Ord::cmp(&self.y, &other.y).then(Ord::cmp(&self.x, &other.x))
    }
}

/// Dimensions of a board: valid cells are `[0, width) x [0, height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, pos: Coord) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the in-bounds cells of the Moore neighborhood of `pos`.
    /// Slots that fall off the board are skipped, never wrapped.
    pub fn neighbors(&self, pos: Coord) -> impl Iterator<Item = Coord> + '_ {
        Coord::NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| pos.offset(dx, dy))
            .filter(move |&n| self.contains(n))
    }

    /// All cells of the board in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| Coord::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_has_three_neighbors() {
        let bounds = Bounds::new(4, 4);
        let mut around_origin = bounds.neighbors(Coord::new(0, 0)).collect::<Vec<_>>();
        around_origin.sort();
        assert_eq!(
            around_origin,
            vec![Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)]
        );

        let around_far_corner = bounds.neighbors(Coord::new(3, 3)).count();
        assert_eq!(around_far_corner, 3);
    }

    #[test]
    fn test_inner_cell_has_eight_neighbors() {
        let bounds = Bounds::new(3, 3);
        let centre = Coord::new(1, 1);
        let neighbors = bounds.neighbors(centre).collect::<CellSet>();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&centre));
    }

    #[test]
    fn test_single_cell_board_has_no_neighbors() {
        let bounds = Bounds::new(1, 1);
        assert_eq!(bounds.neighbors(Coord::new(0, 0)).count(), 0);
    }

    #[test]
    fn test_row_major_order() {
        let cells = Bounds::new(2, 2).cells().collect::<Vec<_>>();
        let mut sorted = cells.clone();
        sorted.sort();
        assert_eq!(cells, sorted);
        assert!(Coord::new(5, 0) < Coord::new(0, 1));
    }
}

use std::fmt;

/// Describes how a board stores its live cells and advances them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Every cell of the grid is stored and rescanned each generation.
    Dense,
    /// Only the set of live cells is stored; neighbor counts are accumulated
    /// around live cells.
    #[default]
    Sparse,
    /// Live cells are the leaves of a region quadtree, updated with point
    /// inserts and deletes.
    QuadTree,
}

impl Representation {
    pub const ALL: [Representation; 3] = [Self::Dense, Self::Sparse, Self::QuadTree];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Sparse => "sparse",
            Self::QuadTree => "quadtree",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

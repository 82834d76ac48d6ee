use std::fmt;

/// Non-fatal problem found while building a [`Board`](crate::Board).
///
/// Each one is logged with `log::warn!` when it occurs and is also kept on
/// the board, see [`Board::warnings`](crate::Board::warnings).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// The requested rule is not in the catalog; B3/S23 is used instead.
    UnknownRule { name: String },
    /// A quadtree board is not square, so the tree spans a larger square
    /// of the given side.
    NonSquareQuadTree { width: u32, height: u32, side: u64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRule { name } => {
                write!(f, "{name:?} is not a valid rule variant, using B3/S23")
            }
            Self::NonSquareQuadTree {
                width,
                height,
                side,
            } => write!(
                f,
                "quadtree board {width}x{height} is not square, the tree spans {side}x{side}"
            ),
        }
    }
}

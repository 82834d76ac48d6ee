#![warn(clippy::all)]

mod board;
mod coord;
mod dense;
mod pattern;
mod quadtree;
mod representation;
mod rules;
mod sparse;
mod traits;
mod warning;

pub use board::{Board, BoardConfig};
pub use coord::{Bounds, CellSet, Coord};
pub use pattern::{parse_rle, random_cells, Preset, RlePattern, RANDOM_DENSITY};
pub use representation::Representation;
pub use rules::RuleTable;
pub use traits::GoLEngine;
pub use warning::Warning;

pub use dense::DenseEngine;
pub use quadtree::{
    Insertion, PrunePolicy, QuadTree, QuadTreeEngine, Region, Removal, Traversal,
};
pub use sparse::{next_generation, Fate, NeighborTally, SparseEngine};

pub const VERSION: &str = "0.1.0";

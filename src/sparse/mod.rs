mod engine;
mod tally;

pub use engine::SparseEngine;
pub use tally::{next_generation, Fate, NeighborTally};

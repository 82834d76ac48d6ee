mod engine;
mod memory;
mod node;
mod tree;

use memory::NodeArena;
use node::{NodeIdx, NodeKind, QuadTreeNode};

pub use engine::QuadTreeEngine;
pub use node::Region;
pub use tree::{Insertion, PrunePolicy, QuadTree, Removal, Traversal};

use super::{NodeIdx, QuadTreeNode};
use std::ops::{Index, IndexMut};

/// Storage for the nodes of one quadtree.
///
/// Nodes refer to each other by [`NodeIdx`], so a parent link is a plain
/// index and ownership stays with the arena. Released slots are recycled
/// through a free list before the vector grows.
pub(super) struct NodeArena {
    nodes: Vec<QuadTreeNode>,
    free: Vec<NodeIdx>,
    len: usize,
}

impl NodeArena {
    pub(super) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Store `node` and return its NodeIdx.
    pub(super) fn allocate(&mut self, node: QuadTreeNode) -> NodeIdx {
        debug_assert!(node.is_used);
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            self.nodes[idx.0 as usize] = node;
            return idx;
        }
        let idx = NodeIdx(
            self.nodes
                .len()
                .try_into()
                .expect("Ran out of u32 indices"),
        );
        self.nodes.push(node);
        idx
    }

    /// Return the slot of a node that is no longer linked from the tree.
    pub(super) fn release(&mut self, idx: NodeIdx) {
        let node = &mut self.nodes[idx.0 as usize];
        assert!(node.is_used, "double release of node {}", idx.0);
        node.is_used = false;
        node.children = [None; 4];
        node.parent = None;
        self.free.push(idx);
        self.len -= 1;
    }

    pub(super) fn is_used(&self, idx: NodeIdx) -> bool {
        self.nodes
            .get(idx.0 as usize)
            .is_some_and(|node| node.is_used)
    }

    /// Number of nodes currently in use.
    pub(super) fn len(&self) -> usize {
        self.len
    }

    pub(super) fn bytes_total(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<QuadTreeNode>()
            + self.free.capacity() * std::mem::size_of::<NodeIdx>()
    }
}

impl Index<NodeIdx> for NodeArena {
    type Output = QuadTreeNode;

    #[inline]
    fn index(&self, idx: NodeIdx) -> &Self::Output {
        let node = &self.nodes[idx.0 as usize];
        debug_assert!(node.is_used, "access to released node {}", idx.0);
        node
    }
}

impl IndexMut<NodeIdx> for NodeArena {
    #[inline]
    fn index_mut(&mut self, idx: NodeIdx) -> &mut Self::Output {
        let node = &mut self.nodes[idx.0 as usize];
        debug_assert!(node.is_used, "access to released node {}", idx.0);
        node
    }
}

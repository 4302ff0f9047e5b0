//! Huffman tree construction
//!
//! Nodes live in an arena owned by [`HuffmanTree`] and refer to their children
//! by index. The tree is rebuilt independently by the compressor and the
//! decompressor, so construction must be fully deterministic. The default
//! [`MergeOrder::Ranked`] orders nodes by `(weight, rank)` where a leaf's rank
//! is its symbol value and the n-th internal node gets rank `256 + n`.
//! [`MergeOrder::LegacyHeap`] replays the C++ heap the legacy layout was
//! written with.

use crate::code_table::CodeTable;
use crate::error::{CompressError, Result};
use crate::frequency::FrequencyTable;
use crate::legacy_heap::LegacyHeap;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }
}

/// How nodes of equal weight are ordered while merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeOrder {
    /// Total order on `(weight, rank)`.
    #[default]
    Ranked,
    /// libstdc++ `priority_queue` order, for the legacy container layout.
    LegacyHeap,
}

/// Queue entry; `rank` makes the ordering total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pending {
    pub(crate) weight: u64,
    pub(crate) rank: usize,
    pub(crate) id: NodeId,
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.rank).cmp(&(other.weight, other.rank))
    }
}

/// Min-queue of nodes awaiting a merge.
pub(crate) trait NodeQueue {
    fn push(&mut self, node: Pending);
    fn pop(&mut self) -> Option<Pending>;
}

#[derive(Debug, Default)]
struct RankedQueue(BinaryHeap<Reverse<Pending>>);

impl NodeQueue for RankedQueue {
    fn push(&mut self, node: Pending) {
        self.0.push(Reverse(node));
    }

    fn pop(&mut self) -> Option<Pending> {
        self.0.pop().map(|Reverse(p)| p)
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    pub fn from_frequencies(freq: &FrequencyTable) -> Result<Self> {
        Self::build(freq, MergeOrder::Ranked)
    }

    pub fn build(freq: &FrequencyTable, order: MergeOrder) -> Result<Self> {
        let distinct = freq.distinct();
        match order {
            MergeOrder::Ranked => {
                Self::merge(freq, RankedQueue(BinaryHeap::with_capacity(distinct)))
            }
            MergeOrder::LegacyHeap => Self::merge(freq, LegacyHeap::with_capacity(distinct)),
        }
    }

    fn merge<Q: NodeQueue>(freq: &FrequencyTable, mut queue: Q) -> Result<Self> {
        let distinct = freq.distinct();
        if distinct == 0 {
            return Err(CompressError::EmptyInput);
        }

        // Leaves enter the queue in ascending symbol order.
        let mut nodes = Vec::with_capacity(2 * distinct - 1);
        for (symbol, weight) in freq.symbols() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, weight });
            queue.push(Pending {
                weight,
                rank: symbol as usize,
                id,
            });
        }

        let mut merged = 0;
        let root = loop {
            let Some(left) = queue.pop() else {
                return Err(CompressError::EmptyInput);
            };
            let Some(right) = queue.pop() else {
                break left.id;
            };
            // Frequencies sum to at most the u64 total, so this cannot overflow.
            let weight = left.weight + right.weight;
            let id = nodes.len();
            nodes.push(Node::Internal {
                weight,
                left: left.id,
                right: right.id,
            });
            queue.push(Pending {
                weight,
                rank: 256 + merged,
                id,
            });
            merged += 1;
        };

        tracing::debug!(
            leaves = distinct,
            internal = merged,
            "built huffman tree"
        );
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Child reached from internal node `id` along `bit`; `None` at a leaf.
    pub fn step(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.nodes[id] {
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
            Node::Leaf { .. } => None,
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(data: &[u8]) -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data).unwrap()).unwrap()
    }

    #[test]
    fn test_single_symbol_is_leaf_root() {
        let tree = tree_for(b"zzzz");
        assert_eq!(tree.internal_count(), 0);
        assert_eq!(
            *tree.node(tree.root()),
            Node::Leaf {
                symbol: b'z',
                weight: 4
            }
        );
        assert_eq!(tree.step(tree.root(), false), None);
    }

    #[test]
    fn test_full_alphabet_node_counts() {
        let data: Vec<u8> = (0..=255).collect();
        let tree = tree_for(&data);
        assert_eq!(tree.leaf_count(), 256);
        assert_eq!(tree.internal_count(), 255);
        assert_eq!(tree.node(tree.root()).weight(), 256);
    }

    #[test]
    fn test_lowest_weight_goes_left() {
        let tree = tree_for(b"aaab");
        let left = tree.step(tree.root(), false).unwrap();
        let right = tree.step(tree.root(), true).unwrap();
        assert_eq!(*tree.node(left), Node::Leaf { symbol: b'b', weight: 1 });
        assert_eq!(*tree.node(right), Node::Leaf { symbol: b'a', weight: 3 });
    }

    #[test]
    fn test_ties_break_by_symbol_then_creation() {
        // All weights equal: leaves merge in symbol order, and the first
        // internal node ranks after every leaf.
        let tree = tree_for(b"dcba");
        let root = tree.root();
        let left = tree.step(root, false).unwrap();
        let right = tree.step(root, true).unwrap();
        let leaf = |id: NodeId, bit| match *tree.node(tree.step(id, bit).unwrap()) {
            Node::Leaf { symbol, .. } => symbol,
            Node::Internal { .. } => panic!("expected leaf"),
        };
        assert_eq!((leaf(left, false), leaf(left, true)), (b'a', b'b'));
        assert_eq!((leaf(right, false), leaf(right, true)), (b'c', b'd'));
    }

    #[test]
    fn test_rebuild_is_identical() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let a = tree_for(data);
        let b = tree_for(data);
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.root, b.root);
    }

    #[test]
    fn test_legacy_order_differs_on_ties() {
        let freq = FrequencyTable::from_bytes(b"abcdefghij").unwrap();
        let ranked = HuffmanTree::build(&freq, MergeOrder::Ranked).unwrap();
        let legacy = HuffmanTree::build(&freq, MergeOrder::LegacyHeap).unwrap();
        assert_eq!(legacy.internal_count(), 9);
        assert_ne!(ranked.code_table(), legacy.code_table());
    }

    #[test]
    fn test_legacy_order_single_symbol() {
        let freq = FrequencyTable::from_bytes(b"qqq").unwrap();
        let tree = HuffmanTree::build(&freq, MergeOrder::LegacyHeap).unwrap();
        assert_eq!(tree.internal_count(), 0);
    }

    #[test]
    fn test_parent_weight_is_sum_of_children() {
        let tree = tree_for(b"abracadabra alakazam");
        for node in &tree.nodes {
            if let Node::Internal { weight, left, right } = *node {
                assert_eq!(weight, tree.node(left).weight() + tree.node(right).weight());
            }
        }
    }
}

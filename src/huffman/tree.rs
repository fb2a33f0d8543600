use std::collections::BinaryHeap;

use crate::compressor::CodecError;
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::node::{Node, QueuedNode};

if_tracing! {
    use tracing::{debug, info, warn};
}

/// A Huffman tree, immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves enter the queue in symbol order and merged nodes after them, in the order
    /// they are created. Equal weights are resolved by that arrival order, so the same
    /// table always yields the same tree.
    ///
    /// A table with a single symbol yields a tree whose root is a bare leaf.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EmptyInput`] for an empty table.
    pub fn from_frequencies(table: &FrequencyTable) -> Result<Self, CodecError> {
        if_tracing! {
            debug!(target = "huffman", symbols = table.len(), total = table.total(), "tree build start");
        }

        let mut heap = BinaryHeap::with_capacity(table.len());
        let mut arrival = 0u64;
        for (symbol, count) in table.iter() {
            heap.push(QueuedNode { arrival, node: Node::leaf(symbol, count) });
            arrival += 1;
        }

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            heap.push(QueuedNode { arrival, node: Node::merge(left.node, right.node) });
            arrival += 1;
        }

        let Some(QueuedNode { node: root, .. }) = heap.pop() else {
            if_tracing! {
                warn!(target = "huffman", "tree build rejected: no symbols");
            }
            return Err(CodecError::EmptyInput);
        };

        if_tracing! {
            info!(target = "huffman", weight = root.weight(), depth = root.depth(), "tree build complete");
        }
        Ok(Self { root })
    }

    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight, equal to the number of symbols in the text the tree was built for.
    pub const fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of distinct symbols.
    pub fn symbol_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_weights_add_up(node: &Node) {
        if let Node::Internal { weight, left, right } = node {
            assert_eq!(*weight, left.weight() + right.weight());
            assert_weights_add_up(left);
            assert_weights_add_up(right);
        }
    }

    fn leaf_depth(node: &Node, symbol: char) -> Option<usize> {
        match node {
            Node::Leaf { symbol: s, .. } => (*s == symbol).then_some(0),
            Node::Internal { left, right, .. } => leaf_depth(left, symbol)
                .or_else(|| leaf_depth(right, symbol))
                .map(|depth| depth + 1),
        }
    }

    #[test]
    fn empty_table_is_rejected() {
        let result = HuffmanTree::from_frequencies(&FrequencyTable::new());
        assert_eq!(result, Err(CodecError::EmptyInput));
    }

    #[test]
    fn single_symbol_is_a_bare_leaf() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_text("aaaa")).unwrap();
        assert_eq!(tree.root(), &Node::leaf('a', 4));
        assert_eq!(tree.symbol_count(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn frequent_symbols_sit_higher() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_text("aabbbcc")).unwrap();
        assert_eq!(tree.weight(), 7);
        assert_eq!(leaf_depth(tree.root(), 'b'), Some(1));
        assert_eq!(leaf_depth(tree.root(), 'a'), Some(2));
        assert_eq!(leaf_depth(tree.root(), 'c'), Some(2));
    }

    #[test]
    fn ties_are_broken_by_arrival() {
        // a and c tie at 2 and are merged first, a on the left; b (3) then comes before
        // the merged node (4).
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_text("aabbbcc")).unwrap();
        let expected = Node::merge(Node::leaf('b', 3), Node::merge(Node::leaf('a', 2), Node::leaf('c', 2)));
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn same_table_same_tree() {
        let table = FrequencyTable::from_text("abracadabra, abracadabra!");
        let first = HuffmanTree::from_frequencies(&table).unwrap();
        let second = HuffmanTree::from_frequencies(&table.clone()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn weights_add_up() {
        // weights taken from the opendsa Huffman chapter
        let table = FrequencyTable::try_from_counts([
            ('Z', 2),
            ('K', 7),
            ('M', 24),
            ('C', 32),
            ('U', 37),
            ('D', 42),
            ('L', 42),
            ('E', 120),
        ])
        .unwrap();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        assert_eq!(tree.weight(), 306);
        assert_eq!(tree.symbol_count(), 8);
        assert_eq!(leaf_depth(tree.root(), 'E'), Some(1));
        assert_eq!(leaf_depth(tree.root(), 'Z'), Some(6));
        assert_weights_add_up(tree.root());
    }
}

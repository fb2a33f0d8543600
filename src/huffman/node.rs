use core::cmp::Ordering;

/// A node of a Huffman tree.
///
/// Children are owned by their parent, so a tree is never shared or cyclic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: char, weight: u64 },
    Internal { weight: u64, left: Box<Node>, right: Box<Node> },
}

impl Node {
    pub const fn leaf(symbol: char, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Joins two subtrees under a new internal node carrying their combined weight.
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub const fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub const fn symbol(&self) -> Option<char> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Follows one bit down the tree: `false` goes left, `true` goes right.
    /// Leaves have nowhere to go.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { &**right } else { &**left }),
        }
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path. A bare leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A node waiting in the construction queue.
///
/// Ordered by weight, then by `arrival`, the order in which nodes entered the queue. The
/// ordering is reversed so that [`BinaryHeap`](std::collections::BinaryHeap) pops the
/// lightest, earliest node first.
#[derive(Debug)]
pub(crate) struct QueuedNode {
    pub(crate) arrival: u64,
    pub(crate) node: Node,
}

impl QueuedNode {
    fn key(&self) -> (u64, u64) {
        (self.node.weight(), self.arrival)
    }
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueuedNode {}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

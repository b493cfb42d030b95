//! Huffman tree construction.
//!
//! Trees are stored as an arena of [`Node`]s addressed by [`NodeId`]; each
//! internal node refers to its children by index and there are no parent
//! links, since every traversal runs root-to-leaf.
//!
//! Two construction paths exist:
//!
//! - [`HuffmanTree::from_frequencies`]: the greedy merge used when
//!   compressing. Every internal node has exactly two children.
//! - [`HuffmanTree::from_codes`]: rebuilds the tree described by a stored
//!   code table when decompressing. Internal nodes are created lazily, so a
//!   code table that does not cover every branch (the single-symbol case)
//!   leaves some children missing.

use crate::code::Code;
use crate::frequency::{FrequencyTable, NUM_SYMBOLS};
use hufarc_core::error::{HufArcError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a node inside a [`HuffmanTree`].
pub type NodeId = usize;

/// A node of a Huffman tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A symbol.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Occurrences (0 for trees rebuilt from codes).
        frequency: u64,
    },
    /// A branch point.
    Internal {
        /// Sum of the frequencies below this node.
        frequency: u64,
        /// Child reached by a `0` bit.
        left: Option<NodeId>,
        /// Child reached by a `1` bit.
        right: Option<NodeId>,
    },
}

impl Node {
    /// Frequency stored on this node.
    pub fn frequency(&self) -> u64 {
        match *self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => frequency,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Symbol of a leaf.
    pub fn symbol(&self) -> Option<u8> {
        match *self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Child selected by `bit` (`false` = left, `true` = right).
    #[inline]
    pub fn child(&self, bit: bool) -> Option<NodeId> {
        match *self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    left
                }
            }
        }
    }
}

/// A Huffman tree over byte symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the optimal tree for `frequencies`.
    ///
    /// Nodes wait in a min-heap keyed by `(frequency, node id)`. The two
    /// cheapest are repeatedly merged under a new internal node (first popped
    /// on the left) until one remains. Leaves are created in ascending symbol
    /// order and merged nodes get increasing ids, so ties break by symbol
    /// value first and merge order second, and the result is deterministic.
    ///
    /// Returns `None` when every frequency is zero. With a single distinct
    /// symbol the root is that symbol's leaf.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Self> {
        let mut nodes = Vec::with_capacity(2 * NUM_SYMBOLS);
        let mut heap = BinaryHeap::with_capacity(NUM_SYMBOLS);

        for (symbol, frequency) in frequencies.iter() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, frequency });
            heap.push(Reverse((frequency, id)));
        }

        while heap.len() > 1 {
            let (Some(Reverse((left_freq, left))), Some(Reverse((right_freq, right)))) =
                (heap.pop(), heap.pop())
            else {
                break;
            };

            let frequency = left_freq + right_freq;
            let id = nodes.len();
            nodes.push(Node::Internal {
                frequency,
                left: Some(left),
                right: Some(right),
            });
            heap.push(Reverse((frequency, id)));
        }

        let Reverse((_, root)) = heap.pop()?;
        Some(Self { nodes, root })
    }

    /// Rebuild a tree from `(symbol, code)` pairs.
    ///
    /// The order of the pairs does not matter. Fails if a code is empty or
    /// collides with another code (equal to it, or a prefix of it).
    pub fn from_codes<'a, I>(codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, &'a Code)>,
    {
        let mut tree = Self::empty();
        for (symbol, code) in codes {
            tree.insert_code(symbol, code)?;
        }
        Ok(tree)
    }

    /// A tree with a childless internal root and no symbols.
    pub fn empty() -> Self {
        Self {
            nodes: vec![Node::Internal {
                frequency: 0,
                left: None,
                right: None,
            }],
            root: 0,
        }
    }

    /// Attach `symbol` at the position described by `code`, creating
    /// internal nodes along the way.
    pub fn insert_code(&mut self, symbol: u8, code: &Code) -> Result<()> {
        if code.is_empty() {
            return Err(HufArcError::malformed(
                0,
                format!("empty code for symbol {:#04x}", symbol),
            ));
        }

        let last = code.len() - 1;
        let mut current = self.root;

        for (depth, bit) in code.iter().enumerate() {
            if self.nodes[current].is_leaf() {
                return Err(HufArcError::malformed(
                    0,
                    format!(
                        "code {} for symbol {:#04x} extends another symbol's code",
                        code, symbol
                    ),
                ));
            }

            if let Some(next) = self.nodes[current].child(bit) {
                if depth == last {
                    return Err(HufArcError::malformed(
                        0,
                        format!(
                            "code {} for symbol {:#04x} collides with an existing code",
                            code, symbol
                        ),
                    ));
                }
                current = next;
                continue;
            }

            let node = if depth == last {
                Node::Leaf {
                    symbol,
                    frequency: 0,
                }
            } else {
                Node::Internal {
                    frequency: 0,
                    left: None,
                    right: None,
                }
            };
            let id = self.nodes.len();
            self.nodes.push(node);
            self.set_child(current, bit, id);
            current = id;
        }

        Ok(())
    }

    fn set_child(&mut self, parent: NodeId, bit: bool, child: NodeId) {
        if let Node::Internal { left, right, .. } = &mut self.nodes[parent] {
            if bit {
                *right = Some(child);
            } else {
                *left = Some(child);
            }
        }
    }

    /// Id of the root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node with the given id.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Child of `id` selected by `bit`.
    #[inline]
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        self.nodes[id].child(bit)
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Depth of the deepest leaf (0 when the root is a leaf or there are none).
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => max_depth = max_depth.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.extend(left.into_iter().chain(right).map(|c| (c, depth + 1)));
                }
            }
        }
        max_depth
    }

    /// Frequency at the root (total symbol count for frequency-built trees).
    pub fn total_frequency(&self) -> u64 {
        self.nodes[self.root].frequency()
    }
}

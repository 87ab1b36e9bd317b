use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::WeightTable;
use crate::min_heap::MinHeap;

/// Marker byte for an internal node in the serialized tree.
pub const INTERNAL_MARKER: u8 = b'I';

/// Marker byte for a leaf; always followed by exactly one symbol byte.
pub const LEAF_MARKER: u8 = b'L';

/// Deepest nesting a serialized tree may have. A tree over at most 256
/// distinct symbols never gets close.
pub const MAX_TREE_DEPTH: usize = 256;

/// Weight given to leaves read back from a serialized tree, which carries no
/// frequencies.
const DESERIALIZED_LEAF_WEIGHT: u64 = 1;

/// Weight of the placeholder leaf paired with a lone symbol.
const SENTINEL_WEIGHT: u64 = 1;

#[derive(Debug, Clone)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(b: u8, f: u64) -> Self {
        HuffNode::Leaf { weight: f, byte: b }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Join two nodes under a new internal node; `a` becomes the left child.
    pub fn merge(a: Self, b: Self) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn serialize_into(&self, out: &mut Vec<u8>) {
        match self {
            HuffNode::Leaf { byte, .. } => {
                out.push(LEAF_MARKER);
                out.push(*byte);
            }
            HuffNode::Internal { left, right, .. } => {
                out.push(INTERNAL_MARKER);
                left.serialize_into(out);
                right.serialize_into(out);
            }
        }
    }

    /// Parse one node starting at `offset`; returns the node and the offset
    /// just past it. `seen` records symbols already read in this tree.
    fn read(
        data: &[u8],
        offset: usize,
        depth: usize,
        seen: &mut [bool; 256],
    ) -> Result<(HuffNode, usize)> {
        if depth > MAX_TREE_DEPTH {
            return Err(HuffmanError::malformed_tree(offset, "tree nested too deeply"));
        }
        let marker = *data
            .get(offset)
            .ok_or_else(|| HuffmanError::malformed_tree(offset, "tree ends before node"))?;

        match marker {
            LEAF_MARKER => {
                let byte = *data.get(offset + 1).ok_or_else(|| {
                    HuffmanError::malformed_tree(offset + 1, "tree ends inside leaf")
                })?;
                if std::mem::replace(&mut seen[byte as usize], true) {
                    return Err(HuffmanError::malformed_tree(offset + 1, "symbol repeated"));
                }
                Ok((HuffNode::new(byte, DESERIALIZED_LEAF_WEIGHT), offset + 2))
            }
            INTERNAL_MARKER => {
                let (left, next) = HuffNode::read(data, offset + 1, depth + 1, seen)?;
                let (right, next) = HuffNode::read(data, next, depth + 1, seen)?;
                Ok((HuffNode::merge(left, right), next))
            }
            _ => Err(HuffmanError::malformed_tree(offset, "unknown node marker")),
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            HuffNode::Leaf { byte, weight } => {
                writeln!(
                    f,
                    "{}{}-> Leaf: {:?} (0x{:02x}) [weight: {}]",
                    indent, label, *byte as char, byte, weight
                )
            }
            HuffNode::Internal { weight, left, right } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                left.fmt_node(f, depth + 1, "L")?;
                right.fmt_node(f, depth + 1, "R")
            }
        }
    }
}

// Trees compare by shape and symbols only; weights are not serialized.
impl PartialEq for HuffNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HuffNode::Leaf { byte: a, .. }, HuffNode::Leaf { byte: b, .. }) => a == b,
            (
                HuffNode::Internal { left: l1, right: r1, .. },
                HuffNode::Internal { left: l2, right: r2, .. },
            ) => l1 == l2 && r1 == r2,
            _ => false,
        }
    }
}

impl Eq for HuffNode {}

/// Heap slot ordered by weight, then by insertion sequence so equal weights
/// always resolve the same way.
struct Pending {
    weight: u64,
    seq: usize,
    node: HuffNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Count the bytes of `bytes` and build their code tree.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::build(&WeightTable::count(bytes))
    }

    /// Huffman's greedy merge over a weight table.
    ///
    /// Leaves are seeded in ascending byte order. Each round pops the two
    /// lightest nodes and joins them, the first popped on the left.
    pub fn build(weights: &WeightTable) -> Result<Self> {
        let mut seq = 0;
        let mut leaves = Vec::with_capacity(weights.distinct());
        for (byte, weight) in weights.iter() {
            leaves.push(Pending {
                weight,
                seq,
                node: HuffNode::new(byte, weight),
            });
            seq += 1;
        }

        let mut heap = MinHeap::build(leaves);
        let root = loop {
            let x = heap.extract_min().ok_or(HuffmanError::EmptyInput)?;
            let Some(y) = heap.extract_min() else {
                break x.node;
            };

            let z = HuffNode::merge(x.node, y.node);
            heap.insert(Pending {
                weight: z.weight(),
                seq,
                node: z,
            });
            seq += 1;
        };

        // A lone leaf has no edge to encode. Pair it with a placeholder leaf
        // for the next byte value on the right, so the real symbol gets "0"
        // and the placeholder's "1" is never emitted.
        let root = match root {
            HuffNode::Leaf { byte, weight } => HuffNode::merge(
                HuffNode::new(byte, weight),
                HuffNode::new(byte.wrapping_add(1), SENTINEL_WEIGHT),
            ),
            internal => internal,
        };

        let tree = HuffmanTree { root };
        debug!(
            symbols = weights.distinct(),
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built code tree"
        );
        Ok(tree)
    }

    pub fn generate_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Preorder encoding: `I` then left then right for internal nodes,
    /// `L` plus the raw symbol byte for leaves.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.leaf_count() * 3);
        self.root.serialize_into(&mut bytes);
        bytes
    }

    /// Parse a tree from the front of `data`, returning it along with the
    /// number of bytes consumed. Trailing bytes are left alone.
    pub fn deserialize(data: &[u8]) -> Result<(HuffmanTree, usize)> {
        let mut seen = [false; 256];
        let (root, consumed) = HuffNode::read(data, 0, 0, &mut seen)?;
        Ok((HuffmanTree { root }, consumed))
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        self.root.fmt_node(f, 0, "root")
    }
}

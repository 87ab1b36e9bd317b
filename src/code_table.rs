//! Byte-to-code mapping derived from a code tree.

use std::collections::BTreeMap;
use std::fmt;

use crate::hufftree::{HuffNode, HuffmanTree};

/// A variable-length bit code, first bit first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Code { bits: Vec::new() }
    }

    fn child(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl From<&str> for Code {
    fn from(text: &str) -> Self {
        let bits = text
            .chars()
            .map(|c| match c {
                '0' => false,
                '1' => true,
                other => panic!("{other:?} is not a bit"),
            })
            .collect();
        Code { bits }
    }
}

/// One code per leaf symbol, keyed by byte value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Depth-first walk: left appends `0`, right appends `1`.
    ///
    /// A leaf reached with an empty path gets `"0"`. Built and parsed trees
    /// never repeat a symbol, so every leaf yields exactly one entry.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = CodeTable::default();
        table.walk(&tree.root, Code::new());
        table
    }

    fn walk(&mut self, node: &HuffNode, path: Code) {
        match node {
            HuffNode::Leaf { byte, .. } => {
                let code = if path.is_empty() {
                    path.child(false)
                } else {
                    path
                };
                self.codes.entry(*byte).or_insert(code);
            }
            HuffNode::Internal { left, right, .. } => {
                self.walk(left, path.child(false));
                self.walk(right, path.child(true));
            }
        }
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes.get(&byte)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&byte, code)| (byte, code))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Number of payload bits `data` would encode to, ignoring padding.
    pub fn encoded_bit_len(&self, data: &[u8]) -> Option<usize> {
        data.iter()
            .try_fold(0usize, |acc, byte| Some(acc + self.get(*byte)?.len()))
    }
}

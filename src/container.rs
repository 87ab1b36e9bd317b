//! On-disk framing.
//!
//! ```text
//! offset  size       field
//! 0       4          serialized tree length N (u32, big-endian)
//! 4       N          serialized tree
//! 4+N     4          original content length (u32, big-endian)
//! 8+N     remainder  packed payload
//! ```

use std::fmt;

use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::hufftree::HuffmanTree;

/// A parsed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub tree: HuffmanTree,
    pub original_length: u32,
    pub payload: Vec<u8>,
}

impl Container {
    /// Summarise this container; `file_bytes` is the size it was parsed from.
    pub fn report(&self, file_bytes: usize) -> ContainerReport {
        ContainerReport {
            file_bytes,
            original_length: self.original_length,
            payload_bytes: self.payload.len(),
            leaves: self.tree.leaf_count(),
            depth: self.tree.depth(),
            code_lengths: self
                .tree
                .generate_table()
                .iter()
                .map(|(byte, code)| (byte, code.len()))
                .collect(),
        }
    }
}

/// What `huffpack inspect` prints about a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerReport {
    pub file_bytes: usize,
    pub original_length: u32,
    pub payload_bytes: usize,
    pub leaves: usize,
    pub depth: usize,
    /// `(symbol, code length in bits)` in ascending symbol order.
    pub code_lengths: Vec<(u8, usize)>,
}

impl fmt::Display for ContainerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "file bytes:      {}", self.file_bytes)?;
        writeln!(f, "content length:  {}", self.original_length)?;
        writeln!(f, "payload bytes:   {}", self.payload_bytes)?;
        writeln!(f, "tree leaves:     {}", self.leaves)?;
        writeln!(f, "tree depth:      {}", self.depth)?;
        for &(byte, len) in &self.code_lengths {
            writeln!(f, "  0x{:02x} {:?}: {} bits", byte, byte as char, len)?;
        }
        Ok(())
    }
}

/// Lay out a complete container.
pub fn assemble(tree: &HuffmanTree, original_length: u32, payload: &[u8]) -> Vec<u8> {
    let tree_data = tree.serialize();
    let mut bytes = Vec::with_capacity(8 + tree_data.len() + payload.len());

    // a tree over at most 256 symbols serializes to well under 1 KiB
    let tree_len = tree_data.len() as u32;
    bytes.extend_from_slice(&tree_len.to_be_bytes());
    bytes.extend_from_slice(&tree_data);
    bytes.extend_from_slice(&original_length.to_be_bytes());
    bytes.extend_from_slice(payload);

    debug!(
        tree_bytes = tree_data.len(),
        original_length,
        payload_bytes = payload.len(),
        "assembled container"
    );
    bytes
}

/// Read cursor over the container bytes.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(HuffmanError::truncated(field, n, self.remaining()));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4, field)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn rest(self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

/// Split a container into its tree, content length and payload.
pub fn parse(data: &[u8]) -> Result<Container> {
    let mut reader = Reader::new(data);

    let tree_len = reader.read_u32("tree length")? as usize;
    let tree_start = reader.pos;
    let tree_data = reader.take(tree_len, "serialized tree")?;
    let (tree, consumed) = HuffmanTree::deserialize(tree_data)
        .map_err(|err| shift_offset(err, tree_start))?;
    if consumed != tree_len {
        return Err(HuffmanError::malformed_tree(
            tree_start + consumed,
            "trailing bytes after tree",
        ));
    }

    let original_length = reader.read_u32("content length")?;
    let payload = reader.rest().to_vec();

    debug!(
        tree_bytes = tree_len,
        original_length,
        payload_bytes = payload.len(),
        "parsed container"
    );
    Ok(Container {
        tree,
        original_length,
        payload,
    })
}

/// Report tree errors relative to the start of the file.
fn shift_offset(err: HuffmanError, base: usize) -> HuffmanError {
    match err {
        HuffmanError::MalformedTree { offset, reason } => {
            HuffmanError::malformed_tree(base + offset, reason)
        }
        other => other,
    }
}

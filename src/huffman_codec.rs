use std::fmt;

use tracing::debug;

use crate::bit_vec::{bits_of, BitVec};
use crate::code_table::CodeTable;
use crate::container::{self, Container};
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Encode `data` with `table`, MSB-first, zero-padded to a whole byte.
///
/// The padded length hides how many bits are meaningful; callers must keep
/// `data.len()` to decode.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<Vec<u8>> {
    let capacity = table.encoded_bit_len(data).unwrap_or(0);
    let mut bit_vec = BitVec::with_capacity(capacity);
    for &byte in data {
        let code = table.get(byte).ok_or(HuffmanError::MissingCode { byte })?;
        bit_vec.push_code(code);
    }
    debug!(
        bytes = data.len(),
        bits = bit_vec.bit_count(),
        packed = bit_vec.as_bytes().len(),
        "packed payload"
    );
    Ok(bit_vec.into_bytes())
}

/// Walk `tree` bit by bit until `original_length` bytes have come out.
///
/// Bits past that point are padding and are never looked at. A root that is
/// itself a leaf decodes one symbol per bit.
pub fn unpack(packed: &[u8], tree: &HuffmanTree, original_length: usize) -> Result<Vec<u8>> {
    // every code is at least one bit, which bounds the output by the payload
    let mut result = Vec::with_capacity(original_length.min(packed.len() * 8));
    if original_length == 0 {
        return Ok(result);
    }

    let mut current = &tree.root;
    for bit in bits_of(packed) {
        current = match current {
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    &**right
                } else {
                    &**left
                }
            }
            leaf => leaf,
        };

        if let HuffNode::Leaf { byte, .. } = current {
            result.push(*byte);
            if result.len() == original_length {
                return Ok(result);
            }
            current = &tree.root;
        }
    }

    Err(HuffmanError::CorruptStream {
        decoded: result.len(),
        expected: original_length,
    })
}

/// A code tree together with the table derived from it.
pub struct HuffmanCodec {
    tree: HuffmanTree,
    encode_table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        let encode_table = tree.generate_table();
        HuffmanCodec { tree, encode_table }
    }

    /// Build a codec tuned to the byte frequencies of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::new(HuffmanTree::from_bytes(data)?))
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn table(&self) -> &CodeTable {
        &self.encode_table
    }

    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        pack(data, &self.encode_table)
    }

    pub fn decode(&self, packed: &[u8], original_length: usize) -> Result<Vec<u8>> {
        unpack(packed, &self.tree, original_length)
    }
}

/// Compress `data` into a complete container.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }
    let original_length =
        u32::try_from(data.len()).map_err(|_| HuffmanError::InputTooLarge { len: data.len() })?;

    let codec = HuffmanCodec::from_bytes(data)?;
    let payload = codec.encode(data)?;
    Ok(container::assemble(codec.tree(), original_length, &payload))
}

/// Reverse of [`compress`].
pub fn decompress(file: &[u8]) -> Result<Vec<u8>> {
    let Container {
        tree,
        original_length,
        payload,
    } = container::parse(file)?;
    unpack(&payload, &tree, original_length as usize)
}

/// Size summary for one compression run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    pub original_bytes: usize,
    pub compressed_bytes: usize,
}

impl CompressionStats {
    pub fn new(original_bytes: usize, compressed_bytes: usize) -> Self {
        CompressionStats {
            original_bytes,
            compressed_bytes,
        }
    }

    /// Compressed size as a fraction of the original.
    pub fn ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        self.compressed_bytes as f64 / self.original_bytes as f64
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} bytes ({:.1}% of original)",
            self.original_bytes,
            self.compressed_bytes,
            self.ratio() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH: &[u8] = b"Hello, world! This is a sample text for Huffman compression. \
        The quick brown fox jumps over the lazy dog. \
        Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    #[test]
    fn test_aaaab_scenario() {
        let codec = HuffmanCodec::from_bytes(b"aaaab").unwrap();
        assert_eq!(codec.table().get(b'a').unwrap().len(), 1);
        assert_eq!(codec.table().get(b'b').unwrap().len(), 1);

        // b -> "0", a -> "1": 11110 padded to 11110000
        let payload = codec.encode(b"aaaab").unwrap();
        assert_eq!(payload, vec![0xf0]);
        assert_eq!(codec.decode(&payload, 5).unwrap(), b"aaaab");

        let file = compress(b"aaaab").unwrap();
        assert_eq!(&file[file.len() - 5..], &[0, 0, 0, 5, 0xf0]);
        assert_eq!(decompress(&file).unwrap(), b"aaaab");
    }

    #[test]
    fn test_roundtrip_text() {
        let file = compress(ENGLISH).unwrap();
        assert_eq!(decompress(&file).unwrap(), ENGLISH);
    }

    #[test]
    fn test_english_payload_shrinks() {
        let codec = HuffmanCodec::from_bytes(ENGLISH).unwrap();
        let payload = codec.encode(ENGLISH).unwrap();
        assert!(payload.len() < ENGLISH.len());
    }

    #[test]
    fn test_single_symbol_roundtrip() {
        let data = vec![0x41u8; 1000];
        let codec = HuffmanCodec::from_bytes(&data).unwrap();
        let payload = codec.encode(&data).unwrap();
        // one zero bit per byte
        assert_eq!(payload, vec![0u8; 125]);
        assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
    }

    #[test]
    fn test_single_byte_input() {
        let file = compress(&[0x00]).unwrap();
        assert_eq!(decompress(&file).unwrap(), vec![0x00]);
    }

    #[test]
    fn test_empty_input_fails_fast() {
        assert!(matches!(compress(&[]), Err(HuffmanError::EmptyInput)));
    }

    #[test]
    fn test_padding_is_not_decoded() {
        // b is "0", so the five pad bits of 0xe0 would each decode to b
        let codec = HuffmanCodec::from_bytes(b"aaab").unwrap();
        assert_eq!(codec.table().get(b'b').unwrap().to_string(), "0");
        let payload = codec.encode(b"aaa").unwrap();
        assert_eq!(payload, vec![0xe0]);
        assert_eq!(codec.decode(&payload, 3).unwrap(), b"aaa");
    }

    #[test]
    fn test_exhausted_stream() {
        let codec = HuffmanCodec::from_bytes(b"aaaab").unwrap();
        let err = codec.decode(&[0xf0], 9).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::CorruptStream {
                decoded: 8,
                expected: 9
            }
        ));
    }

    #[test]
    fn test_missing_code() {
        let codec = HuffmanCodec::from_bytes(b"ab").unwrap();
        assert!(matches!(
            codec.encode(b"abc"),
            Err(HuffmanError::MissingCode { byte: b'c' })
        ));
    }

    #[test]
    fn test_bare_leaf_root_decodes_one_bit_per_symbol() {
        let tree = HuffmanTree {
            root: HuffNode::new(b'z', 1),
        };
        assert_eq!(unpack(&[0x00], &tree, 3).unwrap(), b"zzz");
    }

    #[test]
    fn test_output_is_deterministic() {
        assert_eq!(compress(ENGLISH).unwrap(), compress(ENGLISH).unwrap());
    }

    #[test]
    fn test_stats_display() {
        let stats = CompressionStats::new(200, 50);
        assert_eq!(stats.ratio(), 0.25);
        assert_eq!(stats.to_string(), "200 -> 50 bytes (25.0% of original)");
    }
}

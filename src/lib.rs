//! # huffpack
//!
//! Lossless byte-stream compression with static Huffman codes.
//!
//! The whole input is counted, a prefix-code tree is built from the byte
//! frequencies, and every byte is rewritten as its code. The tree travels
//! with the payload so decompression needs nothing else.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffpack::{compress, decompress};
//!
//! let original = b"abracadabra";
//! let packed = compress(original)?;
//! assert_eq!(decompress(&packed)?, original);
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```
//!
//! ## Files
//!
//! ```rust,no_run
//! use std::path::Path;
//! use huffpack::{file_io, CodecConfig};
//!
//! let config = CodecConfig::default();
//! let input = Path::new("notes.txt");
//! file_io::compress_file(input, &config.compressed_path(input), &config)?;
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```

pub mod code_table;
pub mod config;
pub mod container;
pub mod error;
pub mod file_io;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod logging;

// Internal modules - not part of public API
mod bit_vec;
mod min_heap;

// Re-export main types for convenience
pub use code_table::{Code, CodeTable};
pub use config::CodecConfig;
pub use container::{Container, ContainerReport};
pub use error::{HuffmanError, Result};
pub use frequency::WeightTable;
pub use huffman_codec::{compress, decompress, pack, unpack, CompressionStats, HuffmanCodec};
pub use hufftree::{HuffNode, HuffmanTree};

//! Error types for compression and decompression.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, HuffmanError>;

/// Everything that can stop a compress or decompress run.
///
/// All variants are terminal for the operation in progress; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// The input had no bytes, so there is nothing to build a tree from.
    #[error("cannot build a code tree from empty input")]
    EmptyInput,

    /// Serialized tree bytes do not describe a tree.
    #[error("malformed tree at offset {offset}: {reason}")]
    MalformedTree { offset: usize, reason: &'static str },

    /// The container is shorter than one of its own length fields declares.
    #[error("truncated file: {field} needs {needed} bytes, {available} available")]
    TruncatedFile {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    /// Payload bits ran out before the declared content length was reached.
    #[error("corrupt stream: decoded {decoded} of {expected} bytes before payload ran out")]
    CorruptStream { decoded: usize, expected: usize },

    /// The packer was handed a byte its code table has no entry for.
    #[error("byte 0x{byte:02x} has no code in the table")]
    MissingCode { byte: u8 },

    /// Input longer than the container's 32-bit length field can describe.
    #[error("input of {len} bytes exceeds the 4 GiB container limit")]
    InputTooLarge { len: usize },

    /// I/O error at the file boundary.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffmanError {
    pub fn malformed_tree(offset: usize, reason: &'static str) -> Self {
        HuffmanError::MalformedTree { offset, reason }
    }

    pub fn truncated(field: &'static str, needed: usize, available: usize) -> Self {
        HuffmanError::TruncatedFile {
            field,
            needed,
            available,
        }
    }

    /// Short stable name, used as a structured field in log lines.
    pub fn category(&self) -> &'static str {
        match self {
            HuffmanError::EmptyInput => "empty_input",
            HuffmanError::MalformedTree { .. } => "malformed_tree",
            HuffmanError::TruncatedFile { .. } => "truncated_file",
            HuffmanError::CorruptStream { .. } => "corrupt_stream",
            HuffmanError::MissingCode { .. } => "missing_code",
            HuffmanError::InputTooLarge { .. } => "input_too_large",
            HuffmanError::Io(_) => "io_error",
        }
    }
}

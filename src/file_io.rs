//! File boundary: whole-file reads, atomic whole-file writes, and the
//! compress/decompress drivers built on them.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::CodecConfig;
use crate::error::Result;
use crate::huffman_codec::{self, CompressionStats};

pub fn read_whole_file(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), "read file");
    Ok(data)
}

/// Write `bytes` to `path` through a temporary file in the same directory,
/// renamed into place only once fully written.
pub fn write_whole_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

fn check_target(path: &Path, config: &CodecConfig) -> Result<()> {
    if !config.force && path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        )
        .into());
    }
    Ok(())
}

/// Compress `input` into `output`.
pub fn compress_file(
    input: &Path,
    output: &Path,
    config: &CodecConfig,
) -> Result<CompressionStats> {
    check_target(output, config)?;
    let data = read_whole_file(input)?;
    let compressed = huffman_codec::compress(&data)?;
    write_whole_file(output, &compressed)?;

    let stats = CompressionStats::new(data.len(), compressed.len());
    info!(
        input = %input.display(),
        output = %output.display(),
        ratio = stats.ratio(),
        "compressed {}",
        stats
    );
    Ok(stats)
}

/// Decompress `input` into `output`; returns the number of bytes written.
pub fn decompress_file(input: &Path, output: &Path, config: &CodecConfig) -> Result<usize> {
    check_target(output, config)?;
    let data = read_whole_file(input)?;
    let decompressed = huffman_codec::decompress(&data)?;
    write_whole_file(output, &decompressed)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = decompressed.len(),
        "decompressed"
    );
    Ok(decompressed.len())
}

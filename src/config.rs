//! Output naming and overwrite policy for file-level operations.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension appended to compressed files.
pub const DEFAULT_EXTENSION: &str = "huff";

/// Extension used when decompressing a file that lacks the compressed suffix.
pub const FALLBACK_EXTENSION: &str = "out";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Suffix (without the dot) that marks a compressed file.
    pub extension: String,
    /// Replace an existing output file instead of refusing.
    pub force: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            extension: DEFAULT_EXTENSION.to_string(),
            force: false,
        }
    }
}

impl CodecConfig {
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// `notes.txt` becomes `notes.txt.huff`.
    pub fn compressed_path(&self, input: &Path) -> PathBuf {
        append_extension(input, &self.extension)
    }

    /// `notes.txt.huff` becomes `notes.txt`; anything else gets `.out` appended.
    pub fn decompressed_path(&self, input: &Path) -> PathBuf {
        let has_suffix = input
            .extension()
            .is_some_and(|ext| ext == self.extension.as_str());
        match input.file_stem() {
            Some(stem) if has_suffix => input.with_file_name(stem),
            _ => append_extension(input, FALLBACK_EXTENSION),
        }
    }
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_path() {
        let config = CodecConfig::default();
        assert_eq!(
            config.compressed_path(Path::new("dir/notes.txt")),
            PathBuf::from("dir/notes.txt.huff")
        );
    }

    #[test]
    fn test_decompressed_path() {
        let config = CodecConfig::default();
        assert_eq!(
            config.decompressed_path(Path::new("dir/notes.txt.huff")),
            PathBuf::from("dir/notes.txt")
        );
        assert_eq!(
            config.decompressed_path(Path::new("archive.bin")),
            PathBuf::from("archive.bin.out")
        );
    }

    #[test]
    fn test_custom_extension() {
        let config = CodecConfig {
            extension: "hc".to_string(),
            ..CodecConfig::default()
        }
        .with_force(true);
        assert!(config.force);
        assert_eq!(
            config.decompressed_path(Path::new("a.hc")),
            PathBuf::from("a")
        );
    }
}

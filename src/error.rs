//! Crate-level error types for the copyref CLI shell.

use std::path::PathBuf;

/// Host-layer failures only. The label strategies themselves are total over
/// their input domain and degrade to unlabeled entries instead of erroring —
/// malformed source is data, not a fault. Each variant carries enough context
/// to produce a useful diagnostic without a debugger.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A requested source file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Source file exceeds the configured size limit.
    #[error("file too large ({size_bytes} bytes, max {max_bytes}): {}", file.display())]
    FileTooLarge {
        /// File that exceeded the size limit.
        file: PathBuf,
        /// Maximum allowed file size in bytes.
        max_bytes: u64,
        /// Actual file size in bytes.
        size_bytes: u64,
    },

    /// A `--select` argument could not be parsed.
    #[error("invalid selection `{spec}`: {reason}")]
    InvalidSelection {
        /// Description of what was wrong with the argument.
        reason: String,
        /// The argument as given on the command line.
        spec: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// The `fmt` command was given a non-HTML file.
    #[error("cannot format `.{ext}` files (expected .html or .htm)")]
    UnsupportedExtension {
        /// File extension without the leading dot.
        ext: String,
    },
}

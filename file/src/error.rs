//! Error types for config file loading.
//!
//! Every variant carries the file path so a diagnostic can be printed without
//! re-running.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a config file or selecting its group.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file does not exist.
    #[error("config file not found: '{}'", .path.display())]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        /// Requested path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Malformed syntax for the detected format.
    #[error("failed to parse config file '{}': {reason}", .path.display())]
    Parse {
        /// Requested path.
        path: PathBuf,
        /// Parser message, with a line number where available.
        reason: String,
    },

    /// The file has no top-level section with the group's name.
    #[error("group '{group}' is not found in config file '{}'", .path.display())]
    GroupNotFound {
        /// Group that was looked up.
        group: String,
        /// File that was searched.
        path: PathBuf,
    },
}

/// Convenience alias for results with [`FileError`].
pub type Result<T> = std::result::Result<T, FileError>;

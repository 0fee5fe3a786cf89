//! Error types for schema registration, merging and value access.

use thiserror::Error;

use crate::ValueKind;

/// Schema authoring errors, raised while registering option specs.
///
/// These indicate a bug in a program's option catalog rather than bad user
/// input, so they surface when the registry is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The path was already registered.
    #[error("duplicate option path: {0}")]
    DuplicatePath(String),
    /// Empty path or a path with an empty segment (`"a..b"`, `".a"`).
    #[error("invalid option path: '{0}'")]
    InvalidPath(String),
    /// A required option declared a default value.
    #[error("required option '{0}' must not have a default value")]
    DefaultOnRequired(String),
    /// An optional option declared no default value.
    #[error("optional option '{0}' must have a default value")]
    MissingDefault(String),
    /// The default value does not decode as the declared kind.
    #[error("default value '{value}' of option '{path}' is not a valid {kind}: {reason}")]
    InvalidDefault {
        /// Option path.
        path: String,
        /// Offending default.
        value: String,
        /// Declared kind.
        kind: ValueKind,
        /// Decoder message.
        reason: String,
    },
}

/// Errors raised while overlaying parsed values onto the defaults.
///
/// A merge either applies every parsed key or fails; it never drops values
/// already in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A parsed key is empty or has an empty segment (`".a"`, `"a..b"`).
    #[error("invalid key '{0}': empty path segment")]
    InvalidPath(String),
    /// A parsed key needs a value where the tree holds nested keys, or
    /// nested keys where it holds a value.
    #[error("key '{key}' conflicts with '{at}': a key holds either a value or nested keys")]
    ShapeConflict {
        /// Parsed key being written.
        key: String,
        /// Path already in the tree with the other shape.
        at: String,
    },
}

/// Errors returned by typed reads of a resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No value exists at the path.
    #[error("no value for key '{path}'")]
    KeyNotFound {
        /// Path as requested, qualified with the group in config-file mode.
        path: String,
    },
    /// The value (or one token of it) could not be decoded.
    #[error("cannot convert '{token}' to {target} for key '{path}' (value '{raw}'): {reason}")]
    TypeConversion {
        /// Path of the originating key.
        path: String,
        /// Full raw payload stored at the key.
        raw: String,
        /// Text that failed to decode; equals `raw` for scalar reads.
        token: String,
        /// Requested Rust type.
        target: &'static str,
        /// Decoder message.
        reason: String,
    },
}

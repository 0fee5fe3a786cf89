//! Overlay of parsed values onto defaults.
//!
//! The merge is a set of independent point writes: every leaf of the parsed
//! tree is written, by its full dotted path, into a copy of the default tree.
//! Payloads are copied verbatim; decoding is left to the reader.
//!
//! A write never changes the shape of the tree. A key that holds nested keys
//! (in the defaults or from an earlier write) cannot receive a value, and a
//! key that holds a value cannot receive nested keys. Such input is rejected
//! as a whole, so the outcome does not depend on the order of the keys.
//!
//! # Example
//!
//! ```
//! use optgroup_core::*;
//!
//! let mut defaults = ConfigTree::new();
//! defaults.put("sigma", "0");
//! defaults.put("gpmodel.scale", "50");
//!
//! let mut parsed = ConfigTree::new();
//! parsed.put("sigma", "1.5");
//! parsed.put("input", "a.img");
//!
//! let merged = merge_trees(&defaults, &parsed).unwrap();
//! assert_eq!(merged.get_value("sigma"), Some("1.5"));
//! assert_eq!(merged.get_value("gpmodel.scale"), Some("50"));
//! assert_eq!(merged.get_value("input"), Some("a.img"));
//!
//! let mut flat = ConfigTree::new();
//! flat.put("gpmodel", "x");
//! assert!(matches!(
//!     merge_trees(&defaults, &flat),
//!     Err(MergeError::ShapeConflict { .. })
//! ));
//! ```

use crate::ConfigTree;
use crate::error::MergeError;
use crate::tree::{is_valid_path, join_path};

/// Merges `parsed` over `defaults`.
///
/// Keys present only in `parsed` are inserted. Dots inside parsed key names
/// (flat `gpmodel.scale = 50` lines of an INI section) are split into nested
/// branches, so flat and nested spellings of the same key land on the same
/// path.
///
/// # Errors
///
/// - [`MergeError::InvalidPath`] for a key with an empty segment.
/// - [`MergeError::ShapeConflict`] when a key would replace nested keys by a
///   value or a value by nested keys.
pub fn merge_trees(defaults: &ConfigTree, parsed: &ConfigTree) -> Result<ConfigTree, MergeError> {
    let mut merged = defaults.clone();
    for (path, value) in parsed.leaves() {
        if !is_valid_path(&path) {
            return Err(MergeError::InvalidPath(path));
        }
        check_shape(&merged, &path)?;
        merged.put(&path, value);
    }
    Ok(merged)
}

fn check_shape(tree: &ConfigTree, key: &str) -> Result<(), MergeError> {
    let conflict = |at: String| MergeError::ShapeConflict {
        key: key.to_string(),
        at,
    };

    let mut node = tree;
    let mut walked = String::new();
    for segment in key.split('.') {
        if node.is_leaf() {
            return Err(conflict(walked));
        }
        walked = join_path(&walked, segment);
        match node.child(segment) {
            Some(child) => node = child,
            None => return Ok(()),
        }
    }
    if node.is_leaf() {
        Ok(())
    } else {
        Err(conflict(walked))
    }
}

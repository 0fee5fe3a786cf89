//! Core types for layered option resolution.
//!
//! A program declares its options once, as data, and this crate resolves them
//! into a single read-only configuration:
//!
//! - [`OptionSpec`] / [`OptionRegistry`]: the schema of one option group
//!   (dotted paths, value kinds, required flags, defaults).
//! - [`ConfigTree`]: ordered key/value tree shared by defaults, parsed config
//!   files and the merged result.
//! - [`merge_trees`]: overlays parsed values onto the default tree, refusing
//!   keys that would turn a value into a section or back.
//! - [`validate_required`]: lists every required key a merged tree lacks.
//! - [`render_tree`] / [`render_report`]: indented listing for audits.
//! - [`ResolvedConfiguration`]: the typed read path, backed by either the
//!   command-line table or the merged tree.
//! - [`parse_delimited`]: splits delimited strings into numeric vectors.
//!
//! Values are stored as raw strings and decoded on read, so a schema and a
//! config file can disagree about types without failing until a consumer
//! actually asks for the value.
//!
//! # Example
//!
//! ```
//! use optgroup_core::*;
//!
//! let registry = OptionRegistry::from_specs("REFERENCE", [
//!     OptionSpec::required("input", ValueKind::String),
//!     OptionSpec::optional("sigma", ValueKind::Floating, "0"),
//!     OptionSpec::optional("points_list", ValueKind::String, ""),
//! ]).unwrap();
//!
//! let mut parsed = ConfigTree::new();
//! parsed.put("input", "a.img");
//! parsed.put("points_list", "1 2 3");
//!
//! let merged = merge_trees(&registry.default_tree(), &parsed).unwrap();
//! assert!(validate_required(&registry.required_tree(), &merged, registry.group()).is_empty());
//!
//! let config = ResolvedConfiguration::from_config_file(registry.group(), merged);
//! assert_eq!(config.get::<f64>("sigma").unwrap(), 0.0);
//! assert_eq!(config.get_vector::<u32>("points_list", DEFAULT_DELIMITER).unwrap(), vec![1, 2, 3]);
//! ```

mod error;
mod merge;
mod registry;
mod report;
mod resolved;
mod tree;
mod types;
mod validate;
mod value;
mod vector;

pub use error::{AccessError, MergeError, SchemaError};
pub use merge::merge_trees;
pub use registry::OptionRegistry;
pub use report::{INDENT, KEY_WIDTH, render_report, render_tree};
pub use resolved::{Mode, ResolvedConfiguration};
pub use tree::{ConfigTree, is_valid_path};
pub use types::*;
pub use validate::validate_required;
pub use value::{decode, target_name};
pub use vector::{DEFAULT_DELIMITER, MalformedToken, broadcast, parse_delimited};

//! Required-key validation.
//!
//! Walks the required-flag tree of a registry and reports every required path
//! that the merged configuration does not provide. All missing keys are
//! collected so a configuration file can be fixed in one pass.
//!
//! # Examples
//!
//! ```
//! use optgroup_core::*;
//!
//! let registry = OptionRegistry::from_specs("REFERENCE", [
//!     OptionSpec::required("input", ValueKind::String),
//!     OptionSpec::required("output", ValueKind::String),
//!     OptionSpec::optional("sigma", ValueKind::Floating, "0"),
//! ]).unwrap();
//!
//! let mut merged = registry.default_tree();
//! merged.put("output", "b.vtk");
//!
//! let missing = validate_required(&registry.required_tree(), &merged, registry.group());
//! assert_eq!(missing, vec!["REFERENCE.input".to_string()]);
//! ```

use crate::tree::join_path;
use crate::ConfigTree;

/// Collects the dotted paths of required keys absent from `merged`.
///
/// `required` holds `"true"`/`"false"` leaves; `"false"` (and anything that
/// is not `"true"`) marks an optional path and is skipped. Non-empty branches
/// are recursed into; when `merged` lacks the branch entirely, every required
/// leaf below it is reported. Paths are prefixed with `prefix` (the group
/// name) and listed depth-first in the insertion order of `required`.
pub fn validate_required(required: &ConfigTree, merged: &ConfigTree, prefix: &str) -> Vec<String> {
    let mut missing = Vec::new();
    collect_missing(required, Some(merged), prefix, &mut missing);
    missing
}

fn collect_missing(
    required: &ConfigTree,
    merged: Option<&ConfigTree>,
    prefix: &str,
    missing: &mut Vec<String>,
) {
    for (name, node) in required.children() {
        let path = join_path(prefix, name);
        let present = merged.and_then(|tree| tree.child(name));
        match node {
            ConfigTree::Branch(_) if !node.is_empty() => {
                collect_missing(node, present, &path, missing);
            }
            ConfigTree::Branch(_) => {}
            ConfigTree::Leaf(flag) => {
                if is_required(flag) && present.is_none() {
                    missing.push(path);
                }
            }
        }
    }
}

fn is_required(flag: &str) -> bool {
    flag.trim().eq_ignore_ascii_case("true") || flag.trim() == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> ConfigTree {
        let mut tree = ConfigTree::new();
        tree.put("inplist", "true");
        tree.put("report", "false");
        tree.put("gpmodel.scale", "true");
        tree.put("gpmodel.noise", "false");
        tree.put("outlist", "true");
        tree
    }

    #[test]
    fn test_all_present_passes() {
        let mut merged = ConfigTree::new();
        merged.put("inplist", "a.txt");
        merged.put("outlist", "b.txt");
        merged.put("gpmodel.scale", "50");
        assert!(validate_required(&required(), &merged, "CORRESPONDENCE").is_empty());
    }

    #[test]
    fn test_reports_every_missing_key_in_schema_order() {
        let mut merged = ConfigTree::new();
        merged.put("report", "r.txt");
        let missing = validate_required(&required(), &merged, "CORRESPONDENCE");
        assert_eq!(
            missing,
            vec![
                "CORRESPONDENCE.inplist",
                "CORRESPONDENCE.gpmodel.scale",
                "CORRESPONDENCE.outlist",
            ]
        );
    }

    #[test]
    fn test_nested_required_key_missing_inside_present_branch() {
        let mut merged = ConfigTree::new();
        merged.put("inplist", "a.txt");
        merged.put("outlist", "b.txt");
        merged.put("gpmodel.noise", "0.1");
        let missing = validate_required(&required(), &merged, "G");
        assert_eq!(missing, vec!["G.gpmodel.scale"]);
    }

    #[test]
    fn test_optional_leaves_never_reported() {
        let mut tree = ConfigTree::new();
        tree.put("sigma", "false");
        tree.put("level", "false");
        assert!(validate_required(&tree, &ConfigTree::new(), "G").is_empty());
    }

    #[test]
    fn test_branch_value_satisfies_required_leaf() {
        let mut tree = ConfigTree::new();
        tree.put("gpmodel", "true");
        let mut merged = ConfigTree::new();
        merged.put("gpmodel.scale", "50");
        assert!(validate_required(&tree, &merged, "G").is_empty());
    }

    #[test]
    fn test_empty_prefix_yields_bare_paths() {
        let mut tree = ConfigTree::new();
        tree.put("input", "true");
        assert_eq!(validate_required(&tree, &ConfigTree::new(), ""), vec!["input"]);
    }
}

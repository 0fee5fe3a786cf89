//! Plain-text rendering of configuration trees.
//!
//! Used to print the resolved configuration after a config file has been
//! merged, and again next to the missing-key list when validation fails.

use std::fmt::Write;

use crate::ConfigTree;

/// Column width reserved for key names.
pub const KEY_WIDTH: usize = 16;

/// Spaces of indentation per tree level.
pub const INDENT: usize = 3;

/// Renders a tree as an indented key/value listing, one key per line.
///
/// # Examples
///
/// ```
/// use optgroup_core::*;
///
/// let mut tree = ConfigTree::new();
/// tree.put("input", "a.img");
/// tree.put("gpmodel.scale", "50");
///
/// let text = render_tree(&tree);
/// let lines: Vec<&str> = text.lines().collect();
/// assert_eq!(lines[0], "input            a.img");
/// assert_eq!(lines[1], "gpmodel");
/// assert_eq!(lines[2], "   scale            50");
/// ```
pub fn render_tree(tree: &ConfigTree) -> String {
    let mut out = String::new();
    render_level(tree, 0, &mut out);
    out
}

/// Renders a tree under a `Config data for group 'NAME'` header.
pub fn render_report(group: &str, tree: &ConfigTree) -> String {
    format!("Config data for group '{group}'\n{}", render_tree(tree))
}

fn render_level(tree: &ConfigTree, level: usize, out: &mut String) {
    let indent = " ".repeat(INDENT * level);
    let width = KEY_WIDTH;
    for (name, node) in tree.children() {
        let mut line = format!("{indent}{name:<width$.width$}");
        if let Some(value) = node.value() {
            let _ = write!(line, " {value}");
        }
        out.push_str(line.trim_end());
        out.push('\n');
        render_level(node, level + 1, out);
    }
}

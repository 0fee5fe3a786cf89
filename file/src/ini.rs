//! INI reader.
//!
//! Accepted syntax:
//!
//! ```ini
//! ; comment
//! # comment
//! top_level = value
//!
//! [REFERENCE]
//! input  = a.img
//! sigma  = 0.5
//! points_list = "1 2 3"
//! gpmodel.scale = 50
//! ```
//!
//! Keys and values are trimmed. One pair of matching surrounding quotes is
//! removed from a value. Keys are stored as written: a dotted key stays a
//! single flat key here and is split into a nested path by the merge.

use optgroup_core::{ConfigTree, is_valid_path};

/// Parses INI text into a two-level tree: sections are branches, keys are
/// leaves. Keys before the first section header are top-level leaves.
///
/// # Errors
///
/// Returns a message with the 1-based line number for an unterminated or
/// empty section header, a line without `=`, an empty key or a key with an
/// empty dotted segment, a duplicate section, or a duplicate key within a
/// section.
pub(crate) fn parse_ini(content: &str) -> Result<ConfigTree, String> {
    let mut root = ConfigTree::new();
    let mut current: Option<(String, ConfigTree)> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let end = rest
                .find(']')
                .ok_or_else(|| format!("line {line_no}: unmatched '['"))?;
            let name = rest[..end].trim();
            if name.is_empty() {
                return Err(format!("line {line_no}: empty section name"));
            }
            if let Some((done, section)) = current.take() {
                root.insert(done, section);
            }
            if root.child(name).is_some() {
                return Err(format!("line {line_no}: duplicate section name '{name}'"));
            }
            current = Some((name.to_string(), ConfigTree::new()));
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| format!("line {line_no}: '=' character not found in line"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("line {line_no}: empty key name"));
        }
        if !is_valid_path(key) {
            return Err(format!("line {line_no}: empty segment in key name '{key}'"));
        }
        let value = unquote(value.trim());

        let target = match current.as_mut() {
            Some((_, section)) => section,
            None => &mut root,
        };
        if target.child(key).is_some() {
            return Err(format!("line {line_no}: duplicate key name '{key}'"));
        }
        target.insert(key, ConfigTree::leaf(value));
    }

    if let Some((done, section)) = current {
        root.insert(done, section);
    }
    Ok(root)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

//! Config file loading and group selection.
//!
//! ```no_run
//! use optgroup_file::{extract_group, load_config_file};
//!
//! let tree = load_config_file("pipeline.ini").unwrap();
//! let group = extract_group(&tree, "REFERENCE", "pipeline.ini").unwrap();
//! println!("{} keys in [REFERENCE]", group.len());
//! ```

use std::path::Path;

use optgroup_core::ConfigTree;
use tracing::debug;

use crate::error::{FileError, Result};
use crate::ini::parse_ini;
use crate::structured::{parse_json, parse_toml, parse_yaml};

/// Syntax of a config file, chosen from its extension.
///
/// # Examples
///
/// ```
/// use optgroup_file::FileFormat;
///
/// assert_eq!(FileFormat::from_path("a.toml"), FileFormat::Toml);
/// assert_eq!(FileFormat::from_path("a.YML"), FileFormat::Yaml);
/// assert_eq!(FileFormat::from_path("pipeline.ini"), FileFormat::Ini);
/// assert_eq!(FileFormat::from_path("settings"), FileFormat::Ini);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `[SECTION]` / `key = value` text (the fallback).
    Ini,
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl FileFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Self::Toml,
            "yaml" | "yml" => Self::Yaml,
            "json" => Self::Json,
            _ => Self::Ini,
        }
    }

    /// Parses file content in this format.
    ///
    /// # Errors
    ///
    /// Returns the parser's message on malformed syntax.
    pub fn parse(self, content: &str) -> std::result::Result<ConfigTree, String> {
        match self {
            Self::Ini => parse_ini(content),
            Self::Toml => parse_toml(content),
            Self::Yaml => parse_yaml(content),
            Self::Json => parse_json(content),
        }
    }
}

/// Reads and parses a config file into a tree of groups.
///
/// The file is read in one call and closed before parsing starts.
///
/// # Errors
///
/// - [`FileError::NotFound`] if the file does not exist.
/// - [`FileError::Io`] if it cannot be read.
/// - [`FileError::Parse`] if its syntax is malformed.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<ConfigTree> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FileError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FileError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let format = FileFormat::from_path(path);
    debug!("parsing config file {} as {format:?}", path.display());

    let tree = format.parse(&content).map_err(|reason| FileError::Parse {
        path: path.to_path_buf(),
        reason,
    })?;
    debug!("config file {} holds {} top-level entries", path.display(), tree.len());
    Ok(tree)
}

/// Returns the subtree of the top-level section named `group`.
///
/// `path` is only used for the error message. A top-level plain key with the
/// group's name is not a section and does not match.
///
/// # Errors
///
/// Returns [`FileError::GroupNotFound`] if there is no such section.
pub fn extract_group(tree: &ConfigTree, group: &str, path: impl AsRef<Path>) -> Result<ConfigTree> {
    match tree.child(group) {
        Some(section) if !section.is_leaf() => Ok(section.clone()),
        _ => Err(FileError::GroupNotFound {
            group: group.to_string(),
            path: path.as_ref().to_path_buf(),
        }),
    }
}

/// Loads a config file and returns the section named `group`.
///
/// # Errors
///
/// Any error of [`load_config_file`] or [`extract_group`].
pub fn load_group(path: impl AsRef<Path>, group: &str) -> Result<ConfigTree> {
    let path = path.as_ref();
    let tree = load_config_file(path)?;
    extract_group(&tree, group, path)
}

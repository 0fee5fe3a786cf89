//! The resolved configuration and its typed read path.
//!
//! A [`ResolvedConfiguration`] is produced once per run by either the
//! command-line source or the config-file source. Which one is fixed by
//! construction: the value owns exactly the payload of its mode, and every
//! read goes through [`get`](ResolvedConfiguration::get) or
//! [`get_vector`](ResolvedConfiguration::get_vector), which pick the right
//! payload.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use tracing::error;

use crate::error::AccessError;
use crate::report::render_report;
use crate::tree::join_path;
use crate::value::{decode, target_name};
use crate::vector::parse_delimited;
use crate::{ConfigTree, flag_name};

/// Which source a configuration was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Values come from the command-line table (flag name → raw value).
    CommandLine,
    /// Values come from the config file merged over the defaults.
    ConfigFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    CommandLine(HashMap<String, String>),
    ConfigFile(ConfigTree),
}

/// Read-only result of option resolution.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use optgroup_core::*;
///
/// let table = HashMap::from([
///     ("input".to_string(), "a.img".to_string()),
///     ("sigma".to_string(), "0".to_string()),
/// ]);
/// let config = ResolvedConfiguration::from_command_line("REFERENCE", table);
/// assert_eq!(config.mode(), Mode::CommandLine);
/// assert_eq!(config.get::<String>("input").unwrap(), "a.img");
/// assert_eq!(config.get::<f64>("REFERENCE.sigma").unwrap(), 0.0);
///
/// let mut merged = ConfigTree::new();
/// merged.put("points_list", "1 2  3");
/// let config = ResolvedConfiguration::from_config_file("REFERENCE", merged);
/// assert_eq!(config.get_vector::<f64>("points_list", ' ').unwrap(), vec![1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfiguration {
    group: String,
    source: Source,
}

impl ResolvedConfiguration {
    /// Wraps a command-line table.
    pub fn from_command_line(group: impl Into<String>, table: HashMap<String, String>) -> Self {
        Self {
            group: group.into(),
            source: Source::CommandLine(table),
        }
    }

    /// Wraps a merged, validated config-file tree (relative to the group).
    pub fn from_config_file(group: impl Into<String>, merged: ConfigTree) -> Self {
        Self {
            group: group.into(),
            source: Source::ConfigFile(merged),
        }
    }

    /// Active mode.
    pub fn mode(&self) -> Mode {
        match self.source {
            Source::CommandLine(_) => Mode::CommandLine,
            Source::ConfigFile(_) => Mode::ConfigFile,
        }
    }

    /// Option group name.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Merged tree, in config-file mode.
    pub fn merged_tree(&self) -> Option<&ConfigTree> {
        match &self.source {
            Source::ConfigFile(tree) => Some(tree),
            Source::CommandLine(_) => None,
        }
    }

    /// Rendered listing of the merged tree, in config-file mode.
    pub fn report(&self) -> Option<String> {
        self.merged_tree()
            .map(|tree| render_report(&self.group, tree))
    }

    /// Reads the value at `path` decoded as `T`.
    ///
    /// In config-file mode `path` is looked up in the merged tree. In
    /// command-line mode only its last segment (the flag name) is used.
    ///
    /// # Errors
    ///
    /// - [`AccessError::KeyNotFound`] if no value exists. In command-line
    ///   mode this is how a required option that was never given surfaces.
    /// - [`AccessError::TypeConversion`] if the raw value does not decode.
    pub fn get<T>(&self, path: &str) -> Result<T, AccessError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let (key, raw) = self.raw(path)?;
        decode(raw).map_err(|reason| {
            error!("failed to read '{key}' as {}: {reason} (value '{raw}')", target_name::<T>());
            AccessError::TypeConversion {
                path: key,
                raw: raw.to_string(),
                token: raw.to_string(),
                target: target_name::<T>(),
                reason,
            }
        })
    }

    /// Reads the value at `path` as a `delimiter`-separated vector.
    ///
    /// Empty tokens are dropped, so repeated delimiters collapse.
    ///
    /// # Errors
    ///
    /// - [`AccessError::KeyNotFound`] if no value exists.
    /// - [`AccessError::TypeConversion`] naming the first malformed token.
    pub fn get_vector<T>(&self, path: &str, delimiter: char) -> Result<Vec<T>, AccessError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let (key, raw) = self.raw(path)?;
        parse_delimited(raw, delimiter).map_err(|bad| {
            error!(
                "failed to read token '{}' of '{key}' as {}: {} (value '{raw}')",
                bad.token,
                target_name::<T>(),
                bad.reason
            );
            AccessError::TypeConversion {
                path: key,
                raw: raw.to_string(),
                token: bad.token,
                target: target_name::<T>(),
                reason: bad.reason,
            }
        })
    }

    fn raw(&self, path: &str) -> Result<(String, &str), AccessError> {
        let (key, found) = match &self.source {
            Source::ConfigFile(tree) => (join_path(&self.group, path), tree.get_value(path)),
            Source::CommandLine(table) => {
                let name = flag_name(path);
                (name.to_string(), table.get(name).map(String::as_str))
            }
        };
        match found {
            Some(raw) => Ok((key, raw)),
            None => {
                error!("no value for key '{key}' in group '{}'", self.group);
                Err(AccessError::KeyNotFound { path: key })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config() -> ResolvedConfiguration {
        let mut merged = ConfigTree::new();
        merged.put("input", "a.img");
        merged.put("sigma", "abc");
        merged.put("points_list", "1 x 3");
        merged.put("gpmodel.scale", "50");
        ResolvedConfiguration::from_config_file("REFERENCE", merged)
    }

    #[test]
    fn test_config_file_mode_reads_nested_paths() {
        let config = file_config();
        assert_eq!(config.mode(), Mode::ConfigFile);
        assert_eq!(config.get::<f64>("gpmodel.scale").unwrap(), 50.0);
        assert!(config.report().unwrap().starts_with("Config data for group 'REFERENCE'"));
    }

    #[test]
    fn test_config_file_mode_does_not_strip_path() {
        let config = file_config();
        let err = config.get::<f64>("scale").unwrap_err();
        assert_eq!(
            err,
            AccessError::KeyNotFound {
                path: "REFERENCE.scale".into()
            }
        );
    }

    #[test]
    fn test_type_conversion_carries_raw_value() {
        let err = file_config().get::<f64>("sigma").unwrap_err();
        match err {
            AccessError::TypeConversion {
                path, raw, token, target, ..
            } => {
                assert_eq!(path, "REFERENCE.sigma");
                assert_eq!(raw, "abc");
                assert_eq!(token, "abc");
                assert_eq!(target, "f64");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_vector_token_identified() {
        let err = file_config().get_vector::<f64>("points_list", ' ').unwrap_err();
        match err {
            AccessError::TypeConversion {
                path, raw, token, ..
            } => {
                assert_eq!(path, "REFERENCE.points_list");
                assert_eq!(raw, "1 x 3");
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_branch_is_not_a_value() {
        let err = file_config().get::<String>("gpmodel").unwrap_err();
        assert!(matches!(err, AccessError::KeyNotFound { .. }));
    }

    #[test]
    fn test_command_line_mode_uses_flag_name() {
        let table = HashMap::from([("scale".to_string(), "25".to_string())]);
        let config = ResolvedConfiguration::from_command_line("CORRESPONDENCE", table);
        assert_eq!(config.get::<u32>("gpmodel.scale").unwrap(), 25);
        assert!(config.merged_tree().is_none());
        assert!(config.report().is_none());
    }

    #[test]
    fn test_command_line_missing_required_surfaces_on_read() {
        let config = ResolvedConfiguration::from_command_line("REFERENCE", HashMap::new());
        assert_eq!(
            config.get::<String>("input"),
            Err(AccessError::KeyNotFound {
                path: "input".into()
            })
        );
    }
}

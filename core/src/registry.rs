//! Option registry for one option group.
//!
//! The registry is the schema of a program: an append-only list of
//! [`OptionSpec`]s under a single group name. From it the engine derives the
//! tree of default values, the tree of required flags, and the command-line
//! flag catalog.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::SchemaError;
use crate::tree::{ConfigTree, is_valid_path, join_path};
use crate::value::decode;
use crate::OptionSpec;

/// Append-only set of option specs under one group name.
///
/// # Examples
///
/// ```
/// use optgroup_core::*;
///
/// let mut registry = OptionRegistry::new("REFERENCE");
/// registry.register(OptionSpec::required("input", ValueKind::String)).unwrap();
/// registry.register(OptionSpec::optional("factor", ValueKind::Floating, "0.2")).unwrap();
///
/// assert_eq!(registry.default_value::<f64>("factor"), Some(0.2));
/// assert_eq!(registry.default_tree().get_value("factor"), Some("0.2"));
/// assert_eq!(registry.required_tree().get_value("input"), Some("true"));
/// assert_eq!(registry.qualified("input"), "REFERENCE.input");
///
/// let dup = registry.register(OptionSpec::required("input", ValueKind::String));
/// assert_eq!(dup, Err(SchemaError::DuplicatePath("input".into())));
/// ```
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    group: String,
    specs: Vec<OptionSpec>,
}

impl OptionRegistry {
    /// Creates an empty registry for `group`.
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            specs: Vec::new(),
        }
    }

    /// Builds a registry from a spec list, registering in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] raised by [`register`](Self::register).
    pub fn from_specs(
        group: impl Into<String>,
        specs: impl IntoIterator<Item = OptionSpec>,
    ) -> Result<Self, SchemaError> {
        let mut registry = Self::new(group);
        for spec in specs {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    /// Adds one spec.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::DuplicatePath`] if the path is already registered.
    /// - [`SchemaError::InvalidPath`] for empty paths or empty segments.
    /// - [`SchemaError::DefaultOnRequired`] / [`SchemaError::MissingDefault`]
    ///   when the default does not match the required flag.
    /// - [`SchemaError::InvalidDefault`] when the default does not decode as
    ///   the option's kind.
    pub fn register(&mut self, spec: OptionSpec) -> Result<(), SchemaError> {
        if !is_valid_path(&spec.path) {
            return Err(SchemaError::InvalidPath(spec.path));
        }
        if self.get(&spec.path).is_some() {
            return Err(SchemaError::DuplicatePath(spec.path));
        }
        match (&spec.default, spec.required) {
            (Some(_), true) => return Err(SchemaError::DefaultOnRequired(spec.path)),
            (None, false) => return Err(SchemaError::MissingDefault(spec.path)),
            (Some(value), false) => {
                if let Err(reason) = spec.kind.check(value) {
                    return Err(SchemaError::InvalidDefault {
                        value: value.clone(),
                        path: spec.path,
                        kind: spec.kind,
                        reason,
                    });
                }
            }
            (None, true) => {}
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Group name (the config-file section).
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Registered specs in registration order.
    pub fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    /// Finds a spec by its path.
    pub fn get(&self, path: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|spec| spec.path == path)
    }

    /// Number of registered specs.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Prefixes a path with the group name (`REFERENCE.input`).
    pub fn qualified(&self, path: &str) -> String {
        join_path(&self.group, path)
    }

    /// Typed default of an optional spec; `None` for required or unknown
    /// paths or when the default does not decode as `T`.
    pub fn default_value<T>(&self, path: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.get(path)?.default.as_deref()?;
        decode(raw).ok()
    }

    /// Tree of default values; only optional paths appear.
    pub fn default_tree(&self) -> ConfigTree {
        let mut tree = ConfigTree::new();
        for spec in &self.specs {
            if let Some(default) = &spec.default {
                tree.put(&spec.path, default.as_str());
            }
        }
        tree
    }

    /// Tree of required flags: every path appears with `"true"` or `"false"`.
    pub fn required_tree(&self) -> ConfigTree {
        let mut tree = ConfigTree::new();
        for spec in &self.specs {
            tree.put(&spec.path, if spec.required { "true" } else { "false" });
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueKind;

    fn reference() -> OptionRegistry {
        OptionRegistry::from_specs(
            "REFERENCE",
            [
                OptionSpec::required("input", ValueKind::String),
                OptionSpec::required("output", ValueKind::String),
                OptionSpec::optional("sigma", ValueKind::Floating, "0"),
                OptionSpec::optional("iterations", ValueKind::Unsigned, "100"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_default_tree_only_holds_optional_paths() {
        let tree = reference().default_tree();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get_value("sigma"), Some("0"));
        assert!(!tree.contains("input"));
    }

    #[test]
    fn test_required_tree_marks_every_path() {
        let tree = reference().required_tree();
        let leaves = tree.leaves();
        assert_eq!(
            leaves,
            vec![
                ("input".to_string(), "true"),
                ("output".to_string(), "true"),
                ("sigma".to_string(), "false"),
                ("iterations".to_string(), "false"),
            ]
        );
    }

    #[test]
    fn test_trees_follow_registry_snapshot() {
        let mut registry = reference();
        let before = registry.default_tree();
        assert_eq!(before, registry.default_tree());

        registry
            .register(OptionSpec::optional("gpmodel.scale", ValueKind::Floating, "50"))
            .unwrap();
        assert_eq!(registry.default_tree().get_value("gpmodel.scale"), Some("50"));
        assert_ne!(before, registry.default_tree());
    }

    #[test]
    fn test_register_rejects_default_on_required() {
        let mut registry = OptionRegistry::new("G");
        let mut spec = OptionSpec::required("input", ValueKind::String);
        spec.default = Some("x".into());
        assert_eq!(
            registry.register(spec),
            Err(SchemaError::DefaultOnRequired("input".into()))
        );
    }

    #[test]
    fn test_register_rejects_missing_default() {
        let mut registry = OptionRegistry::new("G");
        let mut spec = OptionSpec::optional("sigma", ValueKind::Floating, "0");
        spec.default = None;
        assert_eq!(
            registry.register(spec),
            Err(SchemaError::MissingDefault("sigma".into()))
        );
    }

    #[test]
    fn test_register_rejects_mistyped_default() {
        let mut registry = OptionRegistry::new("G");
        let err = registry
            .register(OptionSpec::optional("points", ValueKind::Unsigned, "many"))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { ref path, .. } if path == "points"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_rejects_empty_segments() {
        let mut registry = OptionRegistry::new("G");
        for path in ["", "a..b", ".a", "a."] {
            let spec = OptionSpec::required(path, ValueKind::String);
            assert_eq!(
                registry.register(spec),
                Err(SchemaError::InvalidPath(path.to_string()))
            );
        }
    }

    #[test]
    fn test_default_value_is_none_for_required() {
        let registry = reference();
        assert_eq!(registry.default_value::<String>("input"), None);
        assert_eq!(registry.default_value::<usize>("iterations"), Some(100));
    }
}

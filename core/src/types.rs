//! Option schema type definitions.
//!
//! An [`OptionSpec`] declares one option of an option group: its dotted path,
//! the kind of value it carries, and whether it is required or falls back to
//! a default. Specs are plain data; they can be written in code with the
//! builder methods or deserialized from JSON/YAML catalogs.

use serde::{Deserialize, Serialize};

/// Kind of value an option carries.
///
/// Values are always stored as raw strings; the kind is used to check
/// defaults at registration time and command-line values at parse time.
///
/// # Examples
///
/// ```
/// use optgroup_core::ValueKind;
///
/// assert!(ValueKind::Floating.accepts("0.25"));
/// assert!(ValueKind::Unsigned.accepts("100"));
/// assert!(!ValueKind::Unsigned.accepts("-1"));
/// assert!(ValueKind::String.accepts(""));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Free-form text (paths, mode selectors, delimited lists).
    #[default]
    String,
    /// Signed integer.
    Integer,
    /// Unsigned integer (counts, iterations).
    Unsigned,
    /// Floating-point number.
    Floating,
}

impl ValueKind {
    /// Returns `true` if `raw` decodes as this kind.
    pub fn accepts(self, raw: &str) -> bool {
        self.check(raw).is_ok()
    }

    /// Checks that `raw` decodes as this kind, returning the decoder's
    /// message on failure.
    pub fn check(self, raw: &str) -> Result<(), String> {
        match self {
            Self::String => Ok(()),
            Self::Integer => raw.parse::<i64>().map(drop).map_err(|e| e.to_string()),
            Self::Unsigned => raw.parse::<u64>().map(drop).map_err(|e| e.to_string()),
            Self::Floating => raw.parse::<f64>().map(drop).map_err(|e| e.to_string()),
        }
    }

    /// Lowercase name, as used in catalogs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Unsigned => "unsigned",
            Self::Floating => "floating",
        }
    }

    /// Placeholder shown for the value in usage text.
    pub fn value_name(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Integer => "INT",
            Self::Unsigned => "UINT",
            Self::Floating => "FLOAT",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of a single option.
///
/// `path` is dotted and relative to the option group (`"sigma"`,
/// `"gpmodel.scale"`). The last segment doubles as the long command-line
/// flag name.
///
/// A required spec has no default; an optional spec has exactly one. The
/// constructors uphold this, and
/// [`OptionRegistry::register`](crate::OptionRegistry::register) re-checks it
/// for specs built by hand or deserialized.
///
/// # Examples
///
/// ```
/// use optgroup_core::{OptionSpec, ValueKind};
///
/// let input = OptionSpec::required("input", ValueKind::String)
///     .with_short('i')
///     .with_description("The path to the input image file.");
/// assert!(input.required);
/// assert_eq!(input.flag_name(), "input");
///
/// let scale = OptionSpec::optional("gpmodel.scale", ValueKind::Floating, "50");
/// assert_eq!(scale.default.as_deref(), Some("50"));
/// assert_eq!(scale.flag_name(), "scale");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Dotted path relative to the option group.
    pub path: String,
    /// Kind of value carried.
    #[serde(default)]
    pub kind: ValueKind,
    /// Whether the option must be supplied when a config file is used.
    #[serde(default)]
    pub required: bool,
    /// Raw default value (optional specs only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Single-character short flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Section title the option is listed under in usage text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
}

impl OptionSpec {
    /// Creates a required option (no default).
    pub fn required(path: &str, kind: ValueKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
            required: true,
            default: None,
            short: None,
            description: None,
            heading: None,
        }
    }

    /// Creates an optional option with its raw default value.
    pub fn optional(path: &str, kind: ValueKind, default: &str) -> Self {
        Self {
            path: path.to_string(),
            kind,
            required: false,
            default: Some(default.to_string()),
            short: None,
            description: None,
            heading: None,
        }
    }

    /// Adds a short flag.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Sets the usage-text section heading.
    pub fn with_heading(mut self, heading: &str) -> Self {
        self.heading = Some(heading.to_string());
        self
    }

    /// Last path segment, used as the long flag and the command-line key.
    pub fn flag_name(&self) -> &str {
        flag_name(&self.path)
    }
}

/// Strips a dotted path down to its last segment.
///
/// # Examples
///
/// ```
/// assert_eq!(optgroup_core::flag_name("gpmodel.scale"), "scale");
/// assert_eq!(optgroup_core::flag_name("input"), "input");
/// ```
pub fn flag_name(path: &str) -> &str {
    match path.rfind('.') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

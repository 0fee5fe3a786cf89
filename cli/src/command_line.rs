//! Command-line source.
//!
//! The flag catalog is derived from an [`OptionRegistry`]: every option gets a
//! long flag named after the last segment of its path, plus its short flag if
//! declared. Optional options carry their default, which is shown in the
//! usage text and lands in the table when the flag is not given. Two flags are
//! built in: `-c/--config <PATH>` and `-h/--help`.
//!
//! Required options are deliberately not enforced here: `--config` alone must
//! be a valid command line. A required option that is neither on the command
//! line nor covered by a config file surfaces when it is first read.

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue};
use clap::{Arg, ArgAction, ArgMatches, Command};
use optgroup_core::{OptionRegistry, ValueKind};
use thiserror::Error;

/// Id and long name of the config-file flag.
pub const CONFIG_FLAG: &str = "config";
/// Id and long name of the help flag.
pub const HELP_FLAG: &str = "help";

const MANDATORY_HEADING: &str = "Mandatory options";
const OPTIONAL_HEADING: &str = "Optional input options";

/// Errors raised while building or applying the flag catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandLineError {
    /// Unknown flag, missing value, repeated flag, or a value that does not
    /// decode as the option's kind.
    #[error("{message}")]
    Syntax {
        /// Offending token as written by the user.
        token: String,
        /// Parser message.
        message: String,
    },
    /// Two options map to the same long or short flag, or an option reuses a
    /// built-in flag.
    #[error("option '{path}' reuses flag '{flag}'")]
    FlagConflict {
        /// Path of the later option.
        path: String,
        /// Flag as it would appear on the command line.
        flag: String,
    },
}

/// Outcome of command-line parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// Flag name → raw value, including defaults of flags not given.
    pub table: HashMap<String, String>,
    /// `-h/--help` was given; nothing else was collected.
    pub help_requested: bool,
    /// Value of `-c/--config`, when given and non-empty.
    pub config_file: Option<PathBuf>,
}

impl CommandLine {
    /// Returns `true` if a config file should be loaded.
    pub fn config_file_requested(&self) -> bool {
        self.config_file.is_some()
    }
}

/// Builds the clap command for a registry.
///
/// The command name is the lowercased group name. The command expects no
/// binary name in its arguments.
///
/// # Errors
///
/// Returns [`CommandLineError::FlagConflict`] when flags collide.
pub fn build_command(registry: &OptionRegistry) -> Result<Command, CommandLineError> {
    let mut command = Command::new(registry.group().to_lowercase())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new(CONFIG_FLAG)
                .short('c')
                .long(CONFIG_FLAG)
                .value_name("PATH")
                .action(ArgAction::Set)
                .help("The path to the config file.")
                .help_heading("Optional config options"),
        )
        .arg(
            Arg::new(HELP_FLAG)
                .short('h')
                .long(HELP_FLAG)
                .action(ArgAction::SetTrue)
                .help("Display this help message")
                .help_heading("Optional help options"),
        );

    let mut longs: HashSet<&str> = HashSet::from([CONFIG_FLAG, HELP_FLAG]);
    let mut shorts: HashSet<char> = HashSet::from(['c', 'h']);

    for spec in registry.specs() {
        let name = spec.flag_name();
        if !longs.insert(name) {
            return Err(CommandLineError::FlagConflict {
                path: spec.path.clone(),
                flag: format!("--{name}"),
            });
        }
        if let Some(short) = spec.short {
            if !shorts.insert(short) {
                return Err(CommandLineError::FlagConflict {
                    path: spec.path.clone(),
                    flag: format!("-{short}"),
                });
            }
        }

        let kind = spec.kind;
        let heading = spec.heading.clone().unwrap_or_else(|| {
            if spec.required {
                MANDATORY_HEADING.to_string()
            } else {
                OPTIONAL_HEADING.to_string()
            }
        });
        let mut arg = Arg::new(name.to_string())
            .long(name.to_string())
            .value_name(kind.value_name())
            .action(ArgAction::Set)
            .allow_negative_numbers(kind != ValueKind::String)
            .value_parser(move |raw: &str| kind.check(raw).map(|()| raw.to_string()))
            .help_heading(heading);
        if let Some(short) = spec.short {
            arg = arg.short(short);
        }
        if let Some(description) = &spec.description {
            arg = arg.help(description.clone());
        }
        if let Some(default) = &spec.default {
            arg = arg.default_value(default.clone());
        }
        command = command.arg(arg);
    }

    Ok(command)
}

/// Renders the usage text for a registry.
///
/// # Errors
///
/// Returns [`CommandLineError::FlagConflict`] when flags collide.
pub fn usage(registry: &OptionRegistry) -> Result<String, CommandLineError> {
    Ok(build_command(registry)?.render_help().to_string())
}

/// Parses `args` (without the program name) against a registry's flags.
///
/// # Errors
///
/// - [`CommandLineError::Syntax`] for unknown flags and malformed values.
/// - [`CommandLineError::FlagConflict`] when the registry's flags collide.
///
/// # Examples
///
/// ```
/// use optgroup_cli::parse_command_line;
/// use optgroup_core::{OptionRegistry, OptionSpec, ValueKind};
///
/// let registry = OptionRegistry::from_specs("REFERENCE", [
///     OptionSpec::required("input", ValueKind::String).with_short('i'),
///     OptionSpec::optional("sigma", ValueKind::Floating, "0"),
/// ]).unwrap();
///
/// let parsed = parse_command_line(&registry, ["-i", "a.img"]).unwrap();
/// assert_eq!(parsed.table["input"], "a.img");
/// assert_eq!(parsed.table["sigma"], "0");
/// assert!(!parsed.config_file_requested());
///
/// let err = parse_command_line(&registry, ["--sigma", "wide"]).unwrap_err();
/// assert!(err.to_string().contains("wide"));
/// ```
pub fn parse_command_line<I, T>(
    registry: &OptionRegistry,
    args: I,
) -> Result<CommandLine, CommandLineError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_command(registry)?
        .try_get_matches_from(args)
        .map_err(syntax_error)?;
    Ok(command_line_from_matches(registry, &matches))
}

/// Collects a [`CommandLine`] from matches of [`build_command`]'s command,
/// for callers that mount it as a subcommand of their own.
///
/// # Panics
///
/// If `matches` were not produced by a command built from `registry`.
pub fn command_line_from_matches(registry: &OptionRegistry, matches: &ArgMatches) -> CommandLine {
    if matches.get_flag(HELP_FLAG) {
        return CommandLine {
            help_requested: true,
            ..CommandLine::default()
        };
    }

    let config_file = matches
        .get_one::<String>(CONFIG_FLAG)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from);

    let table = registry
        .specs()
        .iter()
        .filter_map(|spec| {
            let name = spec.flag_name();
            matches
                .get_one::<String>(name)
                .map(|value| (name.to_string(), value.clone()))
        })
        .collect();

    CommandLine {
        table,
        help_requested: false,
        config_file,
    }
}

fn syntax_error(err: clap::Error) -> CommandLineError {
    let token = [ContextKind::InvalidValue, ContextKind::InvalidArg]
        .into_iter()
        .find_map(|kind| match err.get(kind) {
            Some(ContextValue::String(value)) => Some(value.clone()),
            _ => None,
        })
        .unwrap_or_default();
    let rendered = err.render().to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    CommandLineError::Syntax { token, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optgroup_core::OptionSpec;

    fn registry() -> OptionRegistry {
        OptionRegistry::from_specs(
            "REFERENCE",
            [
                OptionSpec::required("input", ValueKind::String).with_short('i'),
                OptionSpec::required("output", ValueKind::String).with_short('o'),
                OptionSpec::optional("sigma", ValueKind::Floating, "0"),
                OptionSpec::optional("iterations", ValueKind::Unsigned, "100"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_fill_table() {
        let parsed = parse_command_line(&registry(), ["--input", "a.img"]).unwrap();
        assert_eq!(parsed.table.len(), 3);
        assert_eq!(parsed.table["iterations"], "100");
        assert!(!parsed.table.contains_key("output"));
    }

    #[test]
    fn test_help_short_circuits() {
        let parsed = parse_command_line(&registry(), ["-i", "a.img", "-h"]).unwrap();
        assert!(parsed.help_requested);
        assert!(parsed.table.is_empty());
        assert!(parsed.config_file.is_none());
    }

    #[test]
    fn test_config_flag_requires_non_empty_value() {
        let parsed = parse_command_line(&registry(), ["-c", "pipeline.ini"]).unwrap();
        assert_eq!(parsed.config_file, Some(PathBuf::from("pipeline.ini")));

        let parsed = parse_command_line(&registry(), ["--config", ""]).unwrap();
        assert!(!parsed.config_file_requested());
    }

    #[test]
    fn test_unknown_flag_is_syntax_error() {
        let err = parse_command_line(&registry(), ["--bogus", "1"]).unwrap_err();
        match err {
            CommandLineError::Syntax { token, .. } => assert_eq!(token, "--bogus"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_value_names_token() {
        let err = parse_command_line(&registry(), ["--iterations", "-5"]).unwrap_err();
        match err {
            CommandLineError::Syntax { token, message } => {
                assert_eq!(token, "-5");
                assert!(message.contains("--iterations"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_flag_conflicts_detected() {
        let nested = OptionRegistry::from_specs(
            "G",
            [
                OptionSpec::optional("a.scale", ValueKind::Floating, "1"),
                OptionSpec::optional("b.scale", ValueKind::Floating, "1"),
            ],
        )
        .unwrap();
        assert_eq!(
            build_command(&nested).unwrap_err(),
            CommandLineError::FlagConflict {
                path: "b.scale".into(),
                flag: "--scale".into()
            }
        );

        let short = OptionRegistry::from_specs(
            "G",
            [OptionSpec::required("count", ValueKind::Unsigned).with_short('c')],
        )
        .unwrap();
        assert!(matches!(
            build_command(&short),
            Err(CommandLineError::FlagConflict { .. })
        ));
    }

    #[test]
    fn test_usage_lists_defaults_and_headings() {
        let text = usage(&registry()).unwrap();
        assert!(text.contains("Mandatory options"));
        assert!(text.contains("--sigma <FLOAT>"));
        assert!(text.contains("[default: 100]"));
        assert!(text.contains("--config <PATH>"));
    }
}

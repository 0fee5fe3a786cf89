//! Option resolution: command line first, then an optional config file.
//!
//! ```text
//! Start ─▶ CLIParsed ─┬─▶ HelpExit
//!                     ├─▶ NoConfigReady                         (command-line mode)
//!                     └─▶ ConfigFileLoading ─▶ ConfigMerged ─▶ Validating ─┬─▶ ValidationFailed
//!                                                                          └─▶ ConfigReady (config-file mode)
//! ```
//!
//! When a config file is given, the file alone supplies the values: every
//! other flag on the command line is ignored.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use optgroup_core::{
    ConfigTree, MergeError, OptionRegistry, ResolvedConfiguration, merge_trees, render_report,
    validate_required,
};
use optgroup_file::{FileError, load_group};
use thiserror::Error;
use tracing::debug;

use crate::command_line::{CommandLine, CommandLineError, parse_command_line, usage};

/// Reasons option resolution stops without a configuration.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("An error occurred while parsing the command line: {0}")]
    CommandLine(#[from] CommandLineError),

    /// `-h/--help` was given. Carries the rendered usage text.
    #[error("help requested")]
    HelpRequested { usage: String },

    #[error(transparent)]
    File(#[from] FileError),

    /// The file's keys cannot be laid over the defaults.
    #[error("config file '{}' cannot be merged: {source}", .path.display())]
    Merge {
        path: PathBuf,
        #[source]
        source: MergeError,
    },

    /// The merged tree lacks required keys. `merged` is kept so the caller
    /// can still show what was resolved.
    #[error("config file '{}' is missing required keys: {}", .path.display(), .missing.join(", "))]
    RequiredKeysMissing {
        path: PathBuf,
        merged: ConfigTree,
        missing: Vec<String>,
    },
}

/// Resolves a registry's options from `args` (without the program name).
///
/// Without `--config` the result is in command-line mode and no required-key
/// check runs. With `--config` the named file's group is merged over the
/// registry defaults and checked for every required key.
///
/// # Errors
///
/// See [`ParseError`]. Help is reported as [`ParseError::HelpRequested`].
pub fn parse_from<I, T>(
    registry: &OptionRegistry,
    args: I,
) -> Result<ResolvedConfiguration, ParseError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let parsed = parse_command_line(registry, args)?;
    resolve(registry, parsed)
}

/// Continues resolution from an already parsed command line.
///
/// # Errors
///
/// Same as [`parse_from`], except command-line syntax errors.
pub fn resolve(
    registry: &OptionRegistry,
    parsed: CommandLine,
) -> Result<ResolvedConfiguration, ParseError> {
    if parsed.help_requested {
        debug!("help requested for group {}", registry.group());
        return Err(ParseError::HelpRequested {
            usage: usage(registry)?,
        });
    }

    let Some(path) = parsed.config_file else {
        debug!(
            "resolved group {} from the command line ({} values)",
            registry.group(),
            parsed.table.len()
        );
        return Ok(ResolvedConfiguration::from_command_line(registry.group(), parsed.table));
    };

    debug!("loading group {} from {}", registry.group(), path.display());
    let group = load_group(&path, registry.group())?;

    let defaults = registry.default_tree();
    let merged = match merge_trees(&defaults, &group) {
        Ok(merged) => merged,
        Err(source) => return Err(ParseError::Merge { path, source }),
    };
    debug!(
        "merged {} file entries over {} defaults into {} entries",
        group.leaves().len(),
        defaults.leaves().len(),
        merged.leaves().len()
    );

    let missing = validate_required(&registry.required_tree(), &merged, registry.group());
    if !missing.is_empty() {
        debug!("{} required keys missing from {}", missing.len(), path.display());
        return Err(ParseError::RequiredKeysMissing { path, merged, missing });
    }

    Ok(ResolvedConfiguration::from_config_file(registry.group(), merged))
}

/// Runs [`parse_from`] and prints its outcome with [`report_outcome`].
///
/// Returns `None` when the program should stop.
pub fn parse_options_with<I, T, O, E>(
    registry: &OptionRegistry,
    args: I,
    out: &mut O,
    err: &mut E,
) -> Option<ResolvedConfiguration>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    O: Write,
    E: Write,
{
    report_outcome(registry, parse_from(registry, args), out, err)
}

/// Prints the outcome of a resolution.
///
/// - help and command-line errors print the usage text to `out`;
/// - every failure prints a diagnostic to `err`;
/// - a merged tree is printed to `out`, on success and before the list of
///   missing keys.
///
/// Returns the configuration on success, `None` otherwise.
pub fn report_outcome<O, E>(
    registry: &OptionRegistry,
    outcome: Result<ResolvedConfiguration, ParseError>,
    out: &mut O,
    err: &mut E,
) -> Option<ResolvedConfiguration>
where
    O: Write,
    E: Write,
{
    // Output is best-effort: a closed pipe must not change the outcome.
    match outcome {
        Ok(config) => {
            if let Some(report) = config.report() {
                let _ = write!(out, "{report}");
            }
            Some(config)
        }
        Err(ParseError::HelpRequested { usage }) => {
            let _ = write!(out, "{usage}");
            None
        }
        Err(ParseError::CommandLine(source)) => {
            let _ = writeln!(err, "An error occurred while parsing the command line.");
            let _ = writeln!(err, "{source}");
            if let Ok(text) = usage(registry) {
                let _ = write!(out, "{text}");
            }
            None
        }
        Err(ParseError::RequiredKeysMissing { path, merged, missing }) => {
            let _ = write!(out, "{}", render_report(registry.group(), &merged));
            let _ = writeln!(
                err,
                "The following required keys were not found in config file '{}':",
                path.display()
            );
            for key in &missing {
                let _ = writeln!(err, "    '{key}'");
            }
            None
        }
        Err(other) => {
            let _ = writeln!(err, "{other}");
            None
        }
    }
}

/// [`parse_options_with`] on the process's stdout and stderr.
pub fn parse_options<I, T>(registry: &OptionRegistry, args: I) -> Option<ResolvedConfiguration>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    parse_options_with(registry, args, &mut std::io::stdout(), &mut std::io::stderr())
}

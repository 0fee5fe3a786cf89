//! Command-line front end for layered option resolution.
//!
//! - [`parse_command_line`] turns argv into a flag table, deriving the flags
//!   from an [`OptionRegistry`](optgroup_core::OptionRegistry).
//! - [`parse_from`] / [`parse_options`] run the whole resolution: command
//!   line, then an optional config file merged over the defaults and checked
//!   for required keys.
//! - [`Program`] holds the option catalogs of the pipeline programs and the
//!   settings views read from a resolved configuration.

mod catalog;
mod command_line;
mod parse;
mod settings;

pub use catalog::Program;
pub use command_line::{
    CONFIG_FLAG, CommandLine, CommandLineError, HELP_FLAG, build_command,
    command_line_from_matches, parse_command_line, usage,
};
pub use parse::{
    ParseError, parse_from, parse_options, parse_options_with, report_outcome, resolve,
};
pub use settings::{
    Alignment, CorrespondenceSettings, ExtractionSettings, ModelBuildingSettings,
    ModelParameters, ReferenceSettings, SettingsError, SpecificitySettings, settings_json,
};

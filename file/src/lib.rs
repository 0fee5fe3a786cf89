//! Config file source for layered option resolution.
//!
//! Loads a structured text file into an [`optgroup_core::ConfigTree`] whose
//! top-level entries are option groups, and selects the group a program's
//! registry is declared under.
//!
//! The syntax is picked from the file extension ([`FileFormat`]):
//!
//! - `.toml`: TOML tables (`[REFERENCE]`).
//! - `.yaml` / `.yml`: a mapping of groups.
//! - `.json`: an object of groups.
//! - anything else: INI sections (`[REFERENCE]` / `key = value`).
//!
//! # Quick start
//!
//! ```no_run
//! use optgroup_file::load_group;
//!
//! let group = load_group("pipeline.ini", "REFERENCE").unwrap();
//! println!("input = {:?}", group.get_value("input"));
//! ```

mod error;
mod ini;
mod loader;
mod structured;

pub use error::{FileError, Result};
pub use loader::{FileFormat, extract_group, load_config_file, load_group};

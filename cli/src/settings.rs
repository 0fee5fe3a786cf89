//! Typed views over a resolved configuration, one per program.
//!
//! Every field is read through the accessor, so a value that was never given
//! or does not decode is reported here, at the first read.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use optgroup_core::{AccessError, DEFAULT_DELIMITER, ResolvedConfiguration, broadcast};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::Program;

/// Errors raised while building a settings view.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("parameters, components and regularization factors must be specified")]
    EmptyModelParameters,

    #[error("alignment 'REFERENCE' needs a non-empty 'reference'")]
    MissingReference,

    #[error("unknown alignment '{0}' (expected GPA or REFERENCE)")]
    UnknownAlignment(String),

    #[error("directory of report file '{}' does not exist", .path.display())]
    ReportDirectory { path: PathBuf },

    #[error("failed to serialize settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings of the `reference` program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceSettings {
    pub input: String,
    pub output: String,
    pub report: String,
    pub sigma: f64,
    pub level: f64,
    pub factor: f64,
    pub iterations: u64,
    pub points: u64,
}

impl ReferenceSettings {
    pub fn from_config(config: &ResolvedConfiguration) -> Result<Self, SettingsError> {
        Ok(Self {
            input: config.get("input")?,
            output: config.get("output")?,
            report: config.get("report")?,
            sigma: config.get("sigma")?,
            level: config.get("level")?,
            factor: config.get("factor")?,
            iterations: config.get("iterations")?,
            points: config.get("points")?,
        })
    }
}

/// Settings of the `extraction` program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionSettings {
    pub input: String,
    pub output: String,
    pub report: String,
    pub sigma: f64,
    pub iterations: u64,
    pub points: u64,
}

impl ExtractionSettings {
    pub fn from_config(config: &ResolvedConfiguration) -> Result<Self, SettingsError> {
        Ok(Self {
            input: config.get("input")?,
            output: config.get("output")?,
            report: config.get("report")?,
            sigma: config.get("sigma")?,
            iterations: config.get("iterations")?,
            points: config.get("points")?,
        })
    }
}

/// How the shapes are aligned before model building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Alignment {
    /// Generalized Procrustes alignment to the population mean.
    Gpa,
    /// Rigid alignment to a reference shape.
    Reference,
}

impl FromStr for Alignment {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GPA" => Ok(Alignment::Gpa),
            "REFERENCE" => Ok(Alignment::Reference),
            other => Err(SettingsError::UnknownAlignment(other.to_string())),
        }
    }
}

/// Settings of the `model-building` program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelBuildingSettings {
    pub inplist: String,
    pub output: String,
    pub alignment: Alignment,
    pub reference: String,
    pub noise: f64,
}

impl ModelBuildingSettings {
    /// Reads the settings. Reference alignment needs a reference.
    pub fn from_config(config: &ResolvedConfiguration) -> Result<Self, SettingsError> {
        let alignment: Alignment = config.get::<String>("alignment")?.parse()?;
        let reference: String = config.get("reference")?;
        if alignment == Alignment::Reference && reference.is_empty() {
            return Err(SettingsError::MissingReference);
        }
        Ok(Self {
            inplist: config.get("inplist")?,
            output: config.get("output")?,
            alignment,
            reference,
            noise: config.get("noise")?,
        })
    }
}

/// Gaussian process model parameters, one entry per registration stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelParameters {
    pub scale: f64,
    pub parameters: Vec<f64>,
    pub components: Vec<u64>,
    pub regularization: Vec<f64>,
}

/// Settings of the `correspondence` program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrespondenceSettings {
    pub inplist: String,
    pub outlist: String,
    pub reference: String,
    pub report: String,
    pub stages: u64,
    pub iterations: u64,
    pub transform: u64,
    pub gpmodel: ModelParameters,
}

impl CorrespondenceSettings {
    /// Reads the settings.
    ///
    /// The number of stages of the model is the length of
    /// `gpmodel.parameters`. Shorter `components` and `regularization` lists
    /// are padded with their last value.
    ///
    /// # Errors
    ///
    /// Any accessor error, [`SettingsError::EmptyModelParameters`] if one
    /// of the three lists is empty, or [`SettingsError::ReportDirectory`].
    pub fn from_config(config: &ResolvedConfiguration) -> Result<Self, SettingsError> {
        let parameters: Vec<f64> = config.get_vector("gpmodel.parameters", DEFAULT_DELIMITER)?;
        let mut components: Vec<u64> = config.get_vector("gpmodel.components", DEFAULT_DELIMITER)?;
        let mut regularization: Vec<f64> =
            config.get_vector("gpmodel.regularization", DEFAULT_DELIMITER)?;

        if parameters.is_empty() || components.is_empty() || regularization.is_empty() {
            return Err(SettingsError::EmptyModelParameters);
        }
        broadcast(&mut components, parameters.len());
        broadcast(&mut regularization, parameters.len());

        let report: String = config.get("report")?;
        check_report_path(&report)?;

        Ok(Self {
            inplist: config.get("inplist")?,
            outlist: config.get("outlist")?,
            reference: config.get("reference")?,
            report,
            stages: config.get("stages")?,
            iterations: config.get("iterations")?,
            transform: config.get("transform")?,
            gpmodel: ModelParameters {
                scale: config.get("gpmodel.scale")?,
                parameters,
                components,
                regularization,
            },
        })
    }
}

/// Settings of the `specificity` program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecificitySettings {
    pub inplist: String,
    pub model: String,
    pub report: String,
    pub samples: u64,
}

impl SpecificitySettings {
    pub fn from_config(config: &ResolvedConfiguration) -> Result<Self, SettingsError> {
        let report: String = config.get("specificity.report")?;
        check_report_path(&report)?;
        Ok(Self {
            inplist: config.get("inplist")?,
            model: config.get("model")?,
            report,
            samples: config.get("specificity.samples")?,
        })
    }
}

/// An empty report path means no report. Otherwise its directory must exist.
fn check_report_path(report: &str) -> Result<(), SettingsError> {
    if report.is_empty() {
        return Ok(());
    }
    let path = Path::new(report);
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
            Err(SettingsError::ReportDirectory {
                path: path.to_path_buf(),
            })
        }
        _ => Ok(()),
    }
}

/// Reads the program's settings and renders them as pretty JSON.
///
/// # Errors
///
/// Any error of the program's `from_config`.
pub fn settings_json(
    program: Program,
    config: &ResolvedConfiguration,
) -> Result<String, SettingsError> {
    let json = match program {
        Program::Reference => {
            serde_json::to_string_pretty(&ReferenceSettings::from_config(config)?)?
        }
        Program::Extraction => {
            serde_json::to_string_pretty(&ExtractionSettings::from_config(config)?)?
        }
        Program::ModelBuilding => {
            serde_json::to_string_pretty(&ModelBuildingSettings::from_config(config)?)?
        }
        Program::Correspondence => {
            serde_json::to_string_pretty(&CorrespondenceSettings::from_config(config)?)?
        }
        Program::Specificity => {
            serde_json::to_string_pretty(&SpecificitySettings::from_config(config)?)?
        }
    };
    Ok(json)
}

//! Option catalogs of the pipeline programs.
//!
//! Each program owns one option group. The catalog is plain data handed to an
//! [`OptionRegistry`]; nothing here depends on how the values are resolved.

use std::fmt;
use std::str::FromStr;

use optgroup_core::{OptionRegistry, OptionSpec, SchemaError, ValueKind};

const REPORT_HEADING: &str = "Optional report options";
const MODEL_HEADING: &str = "Optional model options";

/// A pipeline program with its own option group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Program {
    /// Surface extraction from a reference image.
    Reference,
    /// Surface extraction from a label image.
    Extraction,
    /// Statistical shape model building.
    ModelBuilding,
    /// Shape model based correspondence.
    Correspondence,
    /// Specificity of a shape model.
    Specificity,
}

impl Program {
    /// Every program, in pipeline order.
    pub const ALL: [Program; 5] = [
        Program::Reference,
        Program::Extraction,
        Program::ModelBuilding,
        Program::Correspondence,
        Program::Specificity,
    ];

    /// Name on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Program::Reference => "reference",
            Program::Extraction => "extraction",
            Program::ModelBuilding => "model-building",
            Program::Correspondence => "correspondence",
            Program::Specificity => "specificity",
        }
    }

    /// Option group name, as used for the config-file section.
    pub fn group(self) -> &'static str {
        match self {
            Program::Reference => "REFERENCE",
            Program::Extraction => "EXTRACTION",
            Program::ModelBuilding => "MODELBUILDING",
            Program::Correspondence => "CORRESPONDENCE",
            Program::Specificity => "MODELQUALITY",
        }
    }

    /// One-line description for the program list.
    pub fn about(self) -> &'static str {
        match self {
            Program::Reference => "Extract a reference surface from an image",
            Program::Extraction => "Extract surfaces from label images",
            Program::ModelBuilding => "Build a statistical shape model",
            Program::Correspondence => "Establish correspondence with a Gaussian process model",
            Program::Specificity => "Measure the specificity of a shape model",
        }
    }

    /// Looks a program up by its command-line name.
    pub fn from_name(name: &str) -> Option<Program> {
        Program::ALL.into_iter().find(|program| program.name() == name)
    }

    /// Builds the program's registry.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the catalog is inconsistent.
    pub fn registry(self) -> Result<OptionRegistry, SchemaError> {
        OptionRegistry::from_specs(self.group(), self.specs())
    }

    fn specs(self) -> Vec<OptionSpec> {
        use ValueKind::{Floating, String, Unsigned};

        match self {
            Program::Reference => vec![
                OptionSpec::required("input", String)
                    .with_short('i')
                    .with_description("The path to the input image file."),
                OptionSpec::required("output", String)
                    .with_short('o')
                    .with_description("The path for the output surface file."),
                OptionSpec::optional("sigma", Floating, "0").with_description(
                    "The sigma of the Gaussian kernel measured in world coordinates.",
                ),
                OptionSpec::optional("level", Floating, "0").with_description(
                    "The level value to extract surface from input level set image.",
                ),
                OptionSpec::optional("factor", Floating, "0.2")
                    .with_description("The relaxation factor for Laplacian smoothing."),
                OptionSpec::optional("iterations", Unsigned, "100")
                    .with_description("The number of iterations."),
                OptionSpec::optional("points", Unsigned, "0")
                    .with_description("The number of points in output surface."),
                OptionSpec::optional("report", String, "")
                    .with_short('r')
                    .with_description("The path for the file to print report.")
                    .with_heading(REPORT_HEADING),
            ],
            Program::Extraction => vec![
                OptionSpec::required("input", String)
                    .with_short('i')
                    .with_description("Path to input image file."),
                OptionSpec::required("output", String)
                    .with_short('o')
                    .with_description("Path for output surface file."),
                OptionSpec::optional("sigma", Floating, "0")
                    .with_description("Sigma of the Gaussian kernel used to smooth the input image."),
                OptionSpec::optional("iterations", Unsigned, "100").with_description(
                    "Number of iterations to adjust point positions for output surface.",
                ),
                OptionSpec::optional("points", Unsigned, "0").with_description(
                    "The number of points in output decimated surface (0 disables decimation).",
                ),
                OptionSpec::optional("report", String, "")
                    .with_short('r')
                    .with_description("Output report file.")
                    .with_heading(REPORT_HEADING),
            ],
            Program::ModelBuilding => vec![
                OptionSpec::required("inplist", String)
                    .with_short('i')
                    .with_description("File containing a list of meshes to build shape model from."),
                OptionSpec::required("output", String)
                    .with_short('o')
                    .with_description("Name of the output file."),
                OptionSpec::optional("alignment", String, "GPA").with_description(
                    "How the data is aligned: REFERENCE aligns all datasets rigidly to the \
                     reference and GPA aligns all datasets to the population mean.",
                ),
                OptionSpec::optional("reference", String, "").with_description(
                    "The reference used for model building. Needed if --alignment is REFERENCE.",
                ),
                OptionSpec::optional("noise", Floating, "0")
                    .with_description("Noise variance of the PPCA model."),
            ],
            Program::Correspondence => vec![
                OptionSpec::required("inplist", String)
                    .with_short('i')
                    .with_description("File containing a list of input surfaces."),
                OptionSpec::required("outlist", String)
                    .with_short('o')
                    .with_description("File to write the list of output surfaces to."),
                OptionSpec::required("reference", String)
                    .with_description("The reference surface the model is built from."),
                OptionSpec::optional("stages", Unsigned, "1")
                    .with_description("The number of registration stages."),
                OptionSpec::optional("iterations", Unsigned, "1000")
                    .with_description("The number of iterations per stage."),
                OptionSpec::optional("transform", Unsigned, "3")
                    .with_description("The type of the initial spatial transform."),
                OptionSpec::optional("gpmodel.scale", Floating, "50")
                    .with_description("Scale of the Gaussian process kernel.")
                    .with_heading(MODEL_HEADING),
                OptionSpec::optional("gpmodel.parameters", String, "50")
                    .with_description("Kernel width per stage, space separated.")
                    .with_heading(MODEL_HEADING),
                OptionSpec::optional("gpmodel.components", String, "100")
                    .with_description("Number of model components per stage, space separated.")
                    .with_heading(MODEL_HEADING),
                OptionSpec::optional("gpmodel.regularization", String, "0.1")
                    .with_description("Regularization factor per stage, space separated.")
                    .with_heading(MODEL_HEADING),
                OptionSpec::optional("report", String, "")
                    .with_short('r')
                    .with_description("Output report file.")
                    .with_heading(REPORT_HEADING),
            ],
            Program::Specificity => vec![
                OptionSpec::required("inplist", String)
                    .with_short('i')
                    .with_description("Input file with a list of files of input surfaces."),
                OptionSpec::required("model", String)
                    .with_short('m')
                    .with_description("Input model file."),
                OptionSpec::optional("specificity.report", String, "")
                    .with_short('r')
                    .with_description("Output report file."),
                OptionSpec::optional("specificity.samples", Unsigned, "1000")
                    .with_description("The number of random samples to compute specificity."),
            ],
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::from_name(s).ok_or_else(|| {
            let names: Vec<&str> = Program::ALL.iter().map(|p| p.name()).collect();
            format!("unknown program '{s}' (expected one of: {})", names.join(", "))
        })
    }
}

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use optgroup_cli::{ParseError, Program, ReferenceSettings, parse_from, parse_options_with};
use optgroup_core::{AccessError, DEFAULT_DELIMITER, Mode};
use optgroup_file::FileError;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn run_optgroup(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_optgroup"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run optgroup")
}

// ---------------------------------------------------------------------------
// Resolution scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_command_line_only_success() {
    let registry = Program::Reference.registry().unwrap();
    let config = parse_from(&registry, ["--input", "a.img", "--output", "b.vtk"]).unwrap();

    assert_eq!(config.mode(), Mode::CommandLine);
    assert_eq!(config.get::<String>("input").unwrap(), "a.img");
    assert_eq!(config.get::<f64>("sigma").unwrap(), 0.0);

    let settings = ReferenceSettings::from_config(&config).unwrap();
    assert_eq!(settings.output, "b.vtk");
    assert_eq!(settings.iterations, 100);
}

#[test]
fn test_command_line_mode_skips_required_check() {
    let registry = Program::Reference.registry().unwrap();
    let config = parse_from(&registry, ["--output", "b.vtk"]).unwrap();

    let err = config.get::<String>("input").unwrap_err();
    assert_eq!(
        err,
        AccessError::KeyNotFound {
            path: "input".into()
        }
    );
}

#[test]
fn test_missing_required_key_in_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "pipeline.ini", "[REFERENCE]\noutput = b.vtk\n");
    let registry = Program::Reference.registry().unwrap();

    match parse_from(&registry, ["--config", &path_arg(&path)]) {
        Err(ParseError::RequiredKeysMissing { missing, merged, .. }) => {
            assert_eq!(missing, vec!["REFERENCE.input"]);
            assert_eq!(merged.get_value("output"), Some("b.vtk"));
            assert_eq!(merged.get_value("factor"), Some("0.2"));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let mut out = Vec::new();
    let mut err = Vec::new();
    let config = parse_options_with(&registry, ["-c", &path_arg(&path)], &mut out, &mut err);
    assert!(config.is_none());

    let out = String::from_utf8(out).unwrap();
    let err = String::from_utf8(err).unwrap();
    assert!(out.starts_with("Config data for group 'REFERENCE'\n"));
    assert!(out.contains("b.vtk"));
    assert!(err.contains("'REFERENCE.input'"));
}

#[test]
fn test_group_not_found() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "pipeline.ini", "[EXTRACTION]\ninput = a.img\n");
    let registry = Program::Reference.registry().unwrap();

    match parse_from(&registry, ["-c", &path_arg(&path)]) {
        Err(ParseError::File(FileError::GroupNotFound { group, .. })) => {
            assert_eq!(group, "REFERENCE");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let mut out = Vec::new();
    let mut err = Vec::new();
    assert!(parse_options_with(&registry, ["-c", &path_arg(&path)], &mut out, &mut err).is_none());
    assert!(out.is_empty(), "nothing is merged before the group is found");
    assert!(String::from_utf8(err).unwrap().contains("group 'REFERENCE' is not found"));
}

#[test]
fn test_malformed_vector_token() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "pipeline.ini",
        "[REFERENCE]\ninput = a.img\noutput = b.vtk\npoints_list = \"1 x 3\"\n",
    );
    let registry = Program::Reference.registry().unwrap();
    let config = parse_from(&registry, ["-c", &path_arg(&path)]).unwrap();
    assert_eq!(config.mode(), Mode::ConfigFile);

    match config.get_vector::<f64>("points_list", DEFAULT_DELIMITER) {
        Err(AccessError::TypeConversion { path, raw, token, .. }) => {
            assert_eq!(path, "REFERENCE.points_list");
            assert_eq!(raw, "1 x 3");
            assert_eq!(token, "x");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_nested_keys_from_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "pipeline.toml",
        r#"
[CORRESPONDENCE]
inplist = "in.txt"
outlist = "out.txt"
reference = "ref.vtk"

[CORRESPONDENCE.gpmodel]
parameters = [50, 30]
components = "20"
"#,
    );
    let registry = Program::Correspondence.registry().unwrap();
    let config = parse_from(&registry, ["-c", &path_arg(&path)]).unwrap();

    assert_eq!(config.get::<f64>("gpmodel.scale").unwrap(), 50.0);
    assert_eq!(
        config
            .get_vector::<u32>("gpmodel.parameters", DEFAULT_DELIMITER)
            .unwrap(),
        vec![50, 30]
    );
}

// ---------------------------------------------------------------------------
// Binary
// ---------------------------------------------------------------------------

#[test]
fn test_binary_prints_settings_json() {
    let output = run_optgroup(&["reference", "-i", "a.img", "-o", "b.vtk", "--sigma", "1.5"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["input"], "a.img");
    assert_eq!(json["sigma"], 1.5);
    assert_eq!(json["points"], 0);
}

#[test]
fn test_binary_reports_config_file_tree() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "pipeline.ini",
        "[MODELBUILDING]\ninplist = shapes.txt\noutput = model.h5\n",
    );
    let output = run_optgroup(&["model-building", "--config", &path_arg(&path)]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Config data for group 'MODELBUILDING'\n"));
    assert!(stdout.contains("\"alignment\": \"GPA\""));
}

#[test]
fn test_binary_help_exits_with_failure() {
    let output = run_optgroup(&["correspondence", "--help"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--regularization <STRING>"));
    assert!(stdout.contains("Mandatory options"));
}

#[test]
fn test_binary_rejects_unknown_program() {
    let output = run_optgroup(&["surface"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unrecognized subcommand 'surface'"), "stderr: {stderr}");
}

#[test]
fn test_binary_top_level_help_lists_programs() {
    let output = run_optgroup(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    for program in Program::ALL {
        assert!(stdout.contains(program.name()), "missing {program} in: {stdout}");
    }
}

#[test]
fn test_binary_rejects_value_over_model_section() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "c.ini",
        "[CORRESPONDENCE]\ninplist = in.txt\noutlist = out.txt\nreference = ref.vtk\ngpmodel = x\n",
    );
    let output = run_optgroup(&["correspondence", "-c", &path_arg(&path)]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("key 'gpmodel' conflicts with 'gpmodel'"), "stderr: {stderr}");
}

#[test]
fn test_binary_logs_without_colour_when_piped() {
    let output = run_optgroup(&["extraction", "-i", "a.img"]);
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("ERROR"), "stderr: {stderr}");
    assert!(!stderr.contains('\u{1b}'), "stderr: {stderr:?}");
}

#[test]
fn test_binary_specificity_checks_report_directory() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("missing").join("report.txt");
    let output = run_optgroup(&[
        "specificity",
        "-i",
        "shapes.txt",
        "-m",
        "model.h5",
        "-r",
        &path_arg(&report),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn test_binary_missing_required_surfaces_on_read() {
    let output = run_optgroup(&["extraction", "-i", "a.img"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("'output'"), "stderr: {stderr}");
}

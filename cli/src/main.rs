use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Command;
use optgroup_cli::{
    Program, build_command, command_line_from_matches, report_outcome, resolve, settings_json,
};
use tracing_subscriber::EnvFilter;

/// Top-level command with one subcommand per program.
fn cli() -> Result<Command, String> {
    let mut command = Command::new("optgroup")
        .about("Resolve pipeline program options from the command line or a config file")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .disable_help_subcommand(true);

    for program in Program::ALL {
        let registry = program.registry().map_err(|e| e.to_string())?;
        let subcommand = build_command(&registry)
            .map_err(|e| e.to_string())?
            .name(program.name())
            .about(program.about())
            .no_binary_name(false);
        command = command.subcommand(subcommand);
    }
    Ok(command)
}

fn main() -> ExitCode {
    let stderr = std::io::stderr();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_ansi(stderr.is_terminal())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves the selected program's options and prints its settings as JSON.
///
/// `Ok(false)` means resolution stopped and has already reported why.
fn run() -> Result<bool, String> {
    let matches = cli()?.get_matches();
    let Some((name, sub_matches)) = matches.subcommand() else {
        return Ok(false);
    };

    let program: Program = name.parse()?;
    let registry = program.registry().map_err(|e| e.to_string())?;
    let outcome = resolve(&registry, command_line_from_matches(&registry, sub_matches));

    let Some(config) = report_outcome(
        &registry,
        outcome,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    ) else {
        return Ok(false);
    };

    let json = settings_json(program, &config).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(true)
}

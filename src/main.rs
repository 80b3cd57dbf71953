//! Reckon - collaborative-filtering rating predictor
//!
//! Trains damped item means, user-user and item-item neighborhood models, and
//! tag-based content profiles over a rating dataset, then scores items for users.

mod cli;
mod commands;

use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use reckon_core::error::{ExitCode as ReckonExitCode, ReckonError};
use reckon_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return argument_failure(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => exit_with(ReckonExitCode::Success),
        Err(e) => {
            report(&e, cli.format, cli.quiet);
            exit_with(e.exit_code())
        }
    }
}

/// Handle a clap failure. Help and version go through clap untouched; real
/// argument errors get the JSON envelope when argv asked for JSON output.
fn argument_failure(err: clap::Error) -> ExitCode {
    let informational = matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    );
    if informational || cli::requested_format(std::env::args().skip(1)) != OutputFormat::Json {
        err.exit();
    }

    let error = ReckonError::UsageError(err.to_string());
    report(&error, OutputFormat::Json, false);
    exit_with(error.exit_code())
}

/// Print a failed command's error to stderr in the selected format
fn report(error: &ReckonError, format: OutputFormat, quiet: bool) {
    match format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if !quiet => eprintln!("error: {}", error),
        OutputFormat::Human => {}
    }
}

fn exit_with(code: ReckonExitCode) -> ExitCode {
    ExitCode::from(code as u8)
}

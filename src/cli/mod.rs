//! CLI argument parsing for reckon
//!
//! Global flags select the rating source (`--db` or `--ratings`), configuration,
//! output format, and logging.

pub mod commands;
pub mod parse;

use clap::Parser;
use std::path::PathBuf;

pub use commands::Commands;
pub use reckon_core::format::OutputFormat;

/// Reckon - collaborative-filtering rating predictor
#[derive(Parser, Debug)]
#[command(name = "reckon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite rating database
    #[arg(long, global = true, env = "RECKON_DB", conflicts_with = "ratings")]
    pub db: Option<PathBuf>,

    /// Ratings CSV loaded into memory (user,item,rating[,timestamp])
    #[arg(long, global = true)]
    pub ratings: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true, env = "RECKON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse::parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directives (e.g. "debug", "reckon_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format named on the raw command line, for errors raised before clap
/// produces a `Cli`. Unparseable values fall back to human output.
pub fn requested_format(args: impl IntoIterator<Item = String>) -> OutputFormat {
    let mut format = OutputFormat::Human;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let value = match arg.strip_prefix("--format") {
            Some("") => args.next(),
            Some(inline) => inline.strip_prefix('=').map(str::to_string),
            None => None,
        };
        if let Some(parsed) = value.and_then(|v| v.parse().ok()) {
            format = parsed;
        }
    }
    format
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_db_and_ratings_conflict() {
        let err = Cli::try_parse_from([
            "reckon", "--db", "a.db", "--ratings", "r.csv", "means",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_predict_splits_id_lists() {
        let cli = Cli::try_parse_from([
            "reckon", "predict", "--user", "1,2", "--items", "10,20,30",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Predict(args)) => {
                assert_eq!(args.user, vec![1, 2]);
                assert_eq!(args.items, vec![10, 20, 30]);
                assert_eq!(args.algo, "user-user");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_requested_format_from_raw_args() {
        let args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(requested_format(args(&["means"])), OutputFormat::Human);
        assert_eq!(
            requested_format(args(&["--format", "json", "predict", "--user"])),
            OutputFormat::Json
        );
        assert_eq!(requested_format(args(&["means", "--format=json"])), OutputFormat::Json);
        assert_eq!(requested_format(args(&["--format", "records"])), OutputFormat::Human);
        assert_eq!(requested_format(args(&["--formatted", "json"])), OutputFormat::Human);
        assert_eq!(requested_format(args(&["--format"])), OutputFormat::Human);
    }
}

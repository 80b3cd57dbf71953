//! `reckon import` command - load a ratings CSV into the SQLite store

use crate::cli::commands::ImportArgs;
use crate::cli::OutputFormat;
use crate::commands::dispatch::{trace_command, CommandContext};
use reckon_core::error::Result;
use reckon_core::import;

/// Execute the import command
pub fn execute(ctx: &CommandContext, args: &ImportArgs) -> Result<()> {
    let ratings = import::load_ratings(&args.csv)?;
    trace_command!(ctx.cli, ctx.start, "parse_csv");

    let mut store = ctx.open_db()?;
    let imported = store.insert_ratings(&ratings)?;
    let total = store.rating_count()?;
    trace_command!(ctx.cli, ctx.start, "insert_ratings");

    tracing::info!(imported, total, "imported ratings");

    match ctx.cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "source": args.csv.display().to_string(),
                "imported": imported,
                "total": total,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                println!(
                    "Imported {} rating(s) from {} ({} total)",
                    imported,
                    args.csv.display(),
                    total
                );
            }
        }
    }

    Ok(())
}

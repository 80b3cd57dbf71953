//! `reckon means` command - damped item means

use crate::cli::commands::MeansArgs;
use crate::cli::OutputFormat;
use crate::commands::dispatch::{trace_command, CommandContext};
use reckon_core::error::Result;
use reckon_core::format::{format_score, score_to_json};
use reckon_core::mean::ItemMeanModel;
use reckon_core::scorer::ranked;

/// Execute the means command
pub fn execute(ctx: &CommandContext, args: &MeansArgs) -> Result<()> {
    let config = ctx.config()?;
    let store = ctx.open_store()?;

    let model = ItemMeanModel::build(&*store, config.damping)?;
    trace_command!(ctx.cli, ctx.start, "build_mean_model");

    let mut items = ranked(model.means());
    if let Some(top) = args.top {
        items.truncate(top);
    }

    match ctx.cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "damping": model.damping(),
                "global_mean": score_to_json(model.global_mean()),
                "items": items
                    .iter()
                    .map(|s| serde_json::json!({
                        "item": s.item,
                        "mean": score_to_json(s.score),
                    }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !ctx.cli.quiet {
                println!(
                    "global mean {} (damping {})",
                    format_score(model.global_mean()),
                    model.damping()
                );
            }
            for s in &items {
                println!("{}\t{}", s.item, format_score(s.score));
            }
        }
    }

    Ok(())
}

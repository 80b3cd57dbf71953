//! `reckon neighbors` command - an item's most similar items

use crate::cli::commands::NeighborsArgs;
use crate::cli::OutputFormat;
use crate::commands::dispatch::{trace_command, CommandContext};
use reckon_core::error::Result;
use reckon_core::format::format_score;
use reckon_core::item_item::ItemItemModel;

/// Execute the neighbors command
pub fn execute(ctx: &CommandContext, args: &NeighborsArgs) -> Result<()> {
    let store = ctx.open_store()?;

    let model = ItemItemModel::build(&*store)?;
    trace_command!(ctx.cli, ctx.start, "build_item_item_model");

    let neighbors = model.top_neighbors(args.item, args.limit)?;

    match ctx.cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "item": args.item,
                "neighbors": neighbors
                    .iter()
                    .map(|&(item, similarity)| serde_json::json!({
                        "item": item,
                        "similarity": similarity,
                    }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if neighbors.is_empty() {
                if !ctx.cli.quiet {
                    println!("No similar items for {}", args.item);
                }
                return Ok(());
            }
            for (item, similarity) in &neighbors {
                println!("{}\t{}", item, format_score(*similarity));
            }
        }
    }

    Ok(())
}

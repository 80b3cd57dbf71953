//! `reckon profile` command - a user's weighted tag profile

use crate::cli::commands::ProfileArgs;
use crate::cli::OutputFormat;
use crate::commands::dispatch::{trace_command, CommandContext};
use reckon_core::error::{ReckonError, Result};
use reckon_core::format::format_score;
use reckon_core::import;
use reckon_core::profile::{UserProfile, WeightedProfileBuilder};

/// Execute the profile command
pub fn execute(ctx: &CommandContext, args: &ProfileArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let tags = import::load_tag_weights(&args.tags)?;
    trace_command!(ctx.cli, ctx.start, "load_tags");

    let ratings = store.user_ratings(args.user)?;
    if ratings.is_empty() {
        return Err(ReckonError::UnknownUser { id: args.user });
    }
    let profile = WeightedProfileBuilder::new(&tags).make_profile(&ratings)?;

    let mut entries = sorted_entries(&profile);
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    match ctx.cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "user": args.user,
                "tags": entries
                    .iter()
                    .map(|(tag, weight)| serde_json::json!({
                        "tag": tag,
                        "weight": weight,
                    }))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if entries.is_empty() {
                if !ctx.cli.quiet {
                    println!("No tagged items rated by user {}", args.user);
                }
                return Ok(());
            }
            for (tag, weight) in &entries {
                println!("{}\t{}", tag, format_score(*weight));
            }
        }
    }

    Ok(())
}

/// Strongest preference first; ties by tag name
fn sorted_entries(profile: &UserProfile) -> Vec<(&str, f64)> {
    let mut entries: Vec<(&str, f64)> = profile
        .iter()
        .map(|(tag, &weight)| (tag.as_str(), weight))
        .collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_sorted_by_weight_then_tag() {
        let profile: UserProfile = [
            ("drama".to_string(), 1.5),
            ("action".to_string(), -2.0),
            ("comedy".to_string(), 1.5),
        ]
        .into_iter()
        .collect();

        let entries = sorted_entries(&profile);
        assert_eq!(
            entries,
            vec![("comedy", 1.5), ("drama", 1.5), ("action", -2.0)]
        );
    }
}

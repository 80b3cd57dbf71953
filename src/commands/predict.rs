//! `reckon predict` command - score candidate items for one or more users
//!
//! Each user is scored independently: a failure for one user is reported and the
//! remaining users are still scored. The exit code follows the first failure.

use std::fmt;
use std::str::FromStr;

use crate::cli::commands::PredictArgs;
use crate::cli::OutputFormat;
use crate::commands::dispatch::{trace_command, CommandContext};
use reckon_core::error::{ReckonError, Result};
use reckon_core::format::{format_score, score_to_json};
use reckon_core::import;
use reckon_core::item_item::{ItemItemModel, ItemItemScorer};
use reckon_core::mean::{ItemMeanModel, MeanItemScorer};
use reckon_core::profile::ContentScorer;
use reckon_core::scorer::{ranked, ItemScorer, ScoreMap};
use reckon_core::store::RatingStore;
use reckon_core::user_user::UserUserScorer;

/// Scoring algorithm selected by `--algo`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Mean,
    UserUser,
    ItemItem,
    Content,
}

impl FromStr for Algorithm {
    type Err = ReckonError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(Algorithm::Mean),
            "user-user" | "uu" => Ok(Algorithm::UserUser),
            "item-item" | "ii" => Ok(Algorithm::ItemItem),
            "content" => Ok(Algorithm::Content),
            other => Err(ReckonError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Mean => write!(f, "mean"),
            Algorithm::UserUser => write!(f, "user-user"),
            Algorithm::ItemItem => write!(f, "item-item"),
            Algorithm::Content => write!(f, "content"),
        }
    }
}

type Outcome = (i64, Result<ScoreMap>);

/// Execute the predict command
pub fn execute(ctx: &CommandContext, args: &PredictArgs) -> Result<()> {
    let algorithm: Algorithm = args.algo.parse()?;
    let config = ctx.config()?;
    let boxed = ctx.open_store()?;
    let store: &dyn RatingStore = &*boxed;

    // Training failures abort the whole command
    match algorithm {
        Algorithm::Mean => {
            let model = ItemMeanModel::build(store, config.damping)?;
            trace_command!(ctx.cli, ctx.start, "build_mean_model");
            run_batch(ctx, args, algorithm, &MeanItemScorer::new(&model))
        }
        Algorithm::UserUser => {
            let scorer = UserUserScorer::new(store, config.user_user);
            run_batch(ctx, args, algorithm, &scorer)
        }
        Algorithm::ItemItem => {
            let model = ItemItemModel::build(store)?;
            trace_command!(ctx.cli, ctx.start, "build_item_item_model");
            let scorer = ItemItemScorer::new(&model, store, config.item_item);
            run_batch(ctx, args, algorithm, &scorer)
        }
        Algorithm::Content => {
            let path = args.tags.as_deref().ok_or_else(|| {
                ReckonError::UsageError("--algo content requires --tags <csv>".to_string())
            })?;
            let tags = import::load_tag_weights(path)?;
            trace_command!(ctx.cli, ctx.start, "load_tags");
            run_batch(ctx, args, algorithm, &ContentScorer::new(store, &tags))
        }
    }
}

fn run_batch(
    ctx: &CommandContext,
    args: &PredictArgs,
    algorithm: Algorithm,
    scorer: &dyn ItemScorer,
) -> Result<()> {
    let outcomes: Vec<Outcome> = args
        .user
        .iter()
        .map(|&user| {
            let result = scorer.score(user, &args.items);
            if let Err(e) = &result {
                tracing::debug!(user, error = %e, "scoring failed");
            }
            (user, result)
        })
        .collect();
    trace_command!(ctx.cli, ctx.start, "score_users");

    match ctx.cli.format {
        OutputFormat::Json => output_json(algorithm, &outcomes)?,
        OutputFormat::Human => output_human(ctx.cli.quiet, algorithm, &outcomes),
    }

    into_batch_result(outcomes)
}

fn output_json(algorithm: Algorithm, outcomes: &[Outcome]) -> Result<()> {
    let results: Vec<_> = outcomes
        .iter()
        .map(|(user, result)| match result {
            Ok(scores) => serde_json::json!({
                "user": user,
                "scores": ranked(scores)
                    .iter()
                    .map(|s| serde_json::json!({
                        "item": s.item,
                        "score": score_to_json(s.score),
                    }))
                    .collect::<Vec<_>>(),
            }),
            Err(e) => serde_json::json!({
                "user": user,
                "error": e.to_json()["error"],
            }),
        })
        .collect();

    let output = serde_json::json!({
        "algorithm": algorithm.to_string(),
        "results": results,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_human(quiet: bool, algorithm: Algorithm, outcomes: &[Outcome]) {
    // A lone failure is reported once, by the top-level error handler
    let report_inline = outcomes.len() > 1;

    for (user, result) in outcomes {
        match result {
            Ok(scores) => {
                if !quiet {
                    println!("user {} ({})", user, algorithm);
                }
                for s in ranked(scores) {
                    println!("  {}\t{}", s.item, format_score(s.score));
                }
            }
            Err(e) => {
                if report_inline && !quiet {
                    eprintln!("error: user {}: {}", user, e);
                }
            }
        }
    }
}

/// Collapse per-user outcomes into the command result
fn into_batch_result(outcomes: Vec<Outcome>) -> Result<()> {
    let total = outcomes.len();
    let mut errors = outcomes.into_iter().filter_map(|(_, result)| result.err());

    let Some(first) = errors.next() else {
        return Ok(());
    };
    if total == 1 {
        return Err(first);
    }

    Err(ReckonError::Batch {
        failed: 1 + errors.count(),
        total,
        first: Box::new(first),
    })
}

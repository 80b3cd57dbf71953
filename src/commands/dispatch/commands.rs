//! Command implementations for all reckon commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{import, means, neighbors, predict, profile};
use reckon_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Import(args) => import::execute(ctx, args),
            Commands::Means(args) => means::execute(ctx, args),
            Commands::Predict(args) => predict::execute(ctx, args),
            Commands::Neighbors(args) => neighbors::execute(ctx, args),
            Commands::Profile(args) => profile::execute(ctx, args),
        }
    }
}

//! Subcommands and their argument structures

use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a ratings CSV into the --db store
    Import(ImportArgs),

    /// Train the damped item-mean model and list item means
    Means(MeansArgs),

    /// Predict ratings for one or more users
    Predict(PredictArgs),

    /// List an item's most similar items from the item-item model
    Neighbors(NeighborsArgs),

    /// Print a user's weighted tag profile
    Profile(ProfileArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// CSV file with user,item,rating[,timestamp] rows
    pub csv: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct MeansArgs {
    /// Only show the N highest means
    #[arg(long, value_parser = super::parse::parse_limit)]
    pub top: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Target user ID(s), comma separated
    #[arg(long, short, required = true, value_delimiter = ',')]
    pub user: Vec<i64>,

    /// Candidate item IDs, comma separated
    #[arg(long, short, required = true, value_delimiter = ',')]
    pub items: Vec<i64>,

    /// Scoring algorithm: mean, user-user, item-item, or content
    #[arg(long, short, default_value = "user-user")]
    pub algo: String,

    /// Item tag weights CSV (item,tag,weight); required by the content algorithm
    #[arg(long)]
    pub tags: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct NeighborsArgs {
    /// Item ID
    #[arg(long)]
    pub item: i64,

    /// Maximum neighbors to list
    #[arg(long, short, default_value = "10", value_parser = super::parse::parse_limit)]
    pub limit: usize,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// User ID
    #[arg(long, short)]
    pub user: i64,

    /// Item tag weights CSV (item,tag,weight)
    #[arg(long)]
    pub tags: PathBuf,

    /// Maximum tags to list
    #[arg(long, short, value_parser = super::parse::parse_limit)]
    pub limit: Option<usize>,
}

//! Command trait and context for dispatching commands

use std::time::Instant;

use crate::cli::Cli;
use reckon_core::config::ReckonConfig;
use reckon_core::error::{ReckonError, Result};
use reckon_core::import;
use reckon_core::store::{MemoryStore, RatingStore, SqliteStore};

use super::trace_command;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Self {
        Self { cli, start }
    }

    /// Load `--config`, or the defaults when no file was given
    pub fn config(&self) -> Result<ReckonConfig> {
        ReckonConfig::load_or_default(self.cli.config.as_deref())
    }

    /// Open the SQLite database named by `--db`
    pub fn open_db(&self) -> Result<SqliteStore> {
        let path = self.cli.db.as_deref().ok_or_else(|| {
            ReckonError::UsageError("this command requires --db <path>".to_string())
        })?;
        let store = SqliteStore::open(path)?;
        trace_command!(self.cli, self.start, "open_db");
        Ok(store)
    }

    /// Open whichever rating source the global flags select
    pub fn open_store(&self) -> Result<Box<dyn RatingStore>> {
        if self.cli.db.is_some() {
            return Ok(Box::new(self.open_db()?));
        }

        match &self.cli.ratings {
            Some(path) => {
                let store: MemoryStore = import::load_ratings(path)?.into_iter().collect();
                trace_command!(self.cli, self.start, "load_ratings");
                Ok(Box::new(store))
            }
            None => Err(ReckonError::UsageError(
                "no rating source: pass --db <path> or --ratings <csv>".to_string(),
            )),
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("reckon {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("A collaborative-filtering rating predictor.");
        println!();
        println!("Run `reckon --help` for usage information.");
        Ok(())
    }
}

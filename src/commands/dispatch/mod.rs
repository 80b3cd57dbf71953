//! Command dispatch logic for reckon

use std::time::Instant;

use crate::cli::Cli;
use reckon_core::error::Result;

mod command;
mod commands;
mod macros;

use command::{Command, NoCommand};
pub(crate) use command::CommandContext;
pub(crate) use macros::trace_command;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let ctx = CommandContext::new(cli, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}

//! Dispatch a parsed command line to its command handler.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, init::init, key::key},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Key(cmd)) => key(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

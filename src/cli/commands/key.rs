use anyhow::Result;
use colored::Colorize;

use super::super::args::KeyCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::FAILURE_MARK;
use crate::core::L10nKey;

/// Print the key `extract` would use for the given text.
pub fn key(cmd: KeyCommand) -> Result<ExitStatus> {
    let text = cmd.text.join(" ");

    match L10nKey::derive(&text) {
        Some(key) => {
            println!("{}", key);
            Ok(ExitStatus::Success)
        }
        None => {
            eprintln!(
                "{} {}",
                FAILURE_MARK.red(),
                format!("Cannot build a key from {:?}: no letters or digits", text).red()
            );
            Ok(ExitStatus::Failure)
        }
    }
}

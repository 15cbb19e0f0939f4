use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::{FAILURE_MARK, SUCCESS_MARK};
use crate::config::{CONFIG_FILE_NAME, Config, default_config_json};
use crate::utils::write_atomic;

/// Write `.arbifyrc.json` with default settings in the current directory.
pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!(
            "{} {}",
            FAILURE_MARK.red(),
            format!("{} already exists", CONFIG_FILE_NAME).red()
        );
        return Ok(ExitStatus::Failure);
    }

    write_atomic(config_path, &(default_config_json()? + "\n"))?;
    println!("{}", created_message(&Config::default()));

    Ok(ExitStatus::Success)
}

fn created_message(config: &Config) -> String {
    format!(
        "{} {}\n  {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green(),
        format!(
            "resources: {}/{}_{}.{}, hook: {}",
            config.l10n_dir,
            config.file_prefix,
            config.default_locale,
            config.resource_extension,
            if config.run_hook { "flutter pub get" } else { "off" }
        )
        .dimmed()
    )
}

//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Move the string literal at a position into the resource files
//! - `key`: Print the resource key derived from some text
//! - `init`: Initialize arbify configuration file

use std::{ops::Range, path::PathBuf};

use anyhow::{Result, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::{Cursor, TriggerMode, buffer::offset_from_line_col};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Key(_)) | Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that touch a project.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Localization directory, relative to the project root (overrides config file)
    #[arg(long)]
    pub l10n_dir: Option<PathBuf>,

    /// Locale of the resource file created when none exist (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where the literal is. Give exactly one of `--offset`, `--line`/`--column`
/// or `--selection`.
#[derive(Debug, Clone, Args)]
pub struct PositionArgs {
    /// Caret position as a byte offset into the file
    #[arg(long, conflicts_with_all = ["line", "column", "selection"])]
    pub offset: Option<usize>,

    /// Caret line (1-based)
    #[arg(long, requires = "column", conflicts_with = "selection")]
    pub line: Option<usize>,

    /// Caret column in characters (1-based)
    #[arg(long, requires = "line", conflicts_with = "selection")]
    pub column: Option<usize>,

    /// Selected byte range, as START..END
    #[arg(long, value_parser = parse_selection)]
    pub selection: Option<Range<usize>>,
}

impl PositionArgs {
    /// Turn the arguments into a cursor within `text`.
    pub fn resolve(&self, text: &str) -> Result<Cursor> {
        let cursor = match (self.offset, self.line, self.column, &self.selection) {
            (Some(offset), _, _, _) => Cursor::Caret(offset),
            (None, Some(line), Some(column), _) => match offset_from_line_col(text, line, column) {
                Some(offset) => Cursor::Caret(offset),
                None => bail!("Position {}:{} is outside the file", line, column),
            },
            (None, None, None, Some(range)) => Cursor::Selection(range.clone()),
            _ => bail!("Specify the literal with --offset, --line and --column, or --selection"),
        };

        if cursor.end() > text.len() {
            bail!(
                "Position {} is past the end of the file ({} bytes)",
                cursor.end(),
                text.len()
            );
        }
        if !text.is_char_boundary(cursor.start()) || !text.is_char_boundary(cursor.end()) {
            bail!("Position {} is inside a multi-byte character", cursor.start());
        }
        Ok(cursor)
    }
}

fn parse_selection(value: &str) -> Result<Range<usize>, String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got \"{}\"", value))?;
    let start: usize = start
        .trim()
        .parse()
        .map_err(|_| format!("invalid selection start \"{}\"", start))?;
    let end: usize = end
        .trim()
        .parse()
        .map_err(|_| format!("invalid selection end \"{}\"", end))?;
    if start > end {
        return Err(format!("selection start {} is after end {}", start, end));
    }
    Ok(start..end)
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Source file containing the literal
    pub file: PathBuf,

    #[command(flatten)]
    pub position: PositionArgs,

    #[command(flatten)]
    pub common: CommonArgs,

    /// How the literal is pointed at (overrides config file)
    #[arg(long, value_enum)]
    pub mode: Option<TriggerMode>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip `flutter pub get` after updating the resource files
    #[arg(long)]
    pub no_hook: bool,
}

#[derive(Debug, Args)]
pub struct KeyCommand {
    /// Text to derive the key from (multiple words are joined with spaces)
    #[arg(required = true)]
    pub text: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace the string literal at a position with a localization lookup
    Extract(ExtractCommand),
    /// Print the resource key that would be derived from some text
    Key(KeyCommand),
    /// Initialize a new .arbifyrc.json configuration file
    Init,
}

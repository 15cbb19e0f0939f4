use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::buffer::{Cursor, SourceBuffer};
use super::locator::locate_at;

/// How the user points at a literal. A build wires exactly one of these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Caret inside a literal, in a recognized source file.
    #[default]
    Caret,
    /// A non-empty selection, in any file.
    Selection,
}

/// What the host knows about the document when deciding whether to offer
/// the extraction.
#[derive(Debug, Clone, Copy)]
pub struct EditContext<'a> {
    pub file_path: Option<&'a Path>,
    pub buffer: SourceBuffer<'a>,
}

/// Whether extraction should be offered in `ctx`.
///
/// Caret mode needs a file with one of `source_extensions` (given without
/// the dot) and a literal under the caret. Selection mode only needs a
/// non-empty selection.
pub fn is_applicable(ctx: &EditContext<'_>, mode: TriggerMode, source_extensions: &[String]) -> bool {
    match (mode, ctx.buffer.cursor) {
        (TriggerMode::Caret, Cursor::Caret(_)) => {
            ctx.file_path
                .is_some_and(|path| has_source_extension(path, source_extensions))
                && locate_at(&ctx.buffer).is_some()
        }
        (TriggerMode::Selection, Cursor::Selection(range)) => !range.is_empty(),
        _ => false,
    }
}

pub fn has_source_extension(path: &Path, source_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| source_extensions.iter().any(|known| known == ext))
}

//! Source Rewriter.
//!
//! Turns a located literal into a lookup expression and makes sure the
//! localization import is present.

use super::buffer::line_end;
use super::edit::{EditPlan, TextEdit};
use super::key::L10nKey;
use super::locator::LiteralMatch;

/// Expression resolving to the generated localizations for the current context.
pub const LOCALIZATION_ACCESSOR: &str = "AppLocalizations.of(context)!";

/// Import that brings [`LOCALIZATION_ACCESSOR`] into scope.
pub const IMPORT_DECLARATION: &str =
    "import 'package:flutter_gen/gen_l10n/app_localizations.dart';";

/// The lookup expression for `key`.
pub fn lookup_expression(key: &L10nKey) -> String {
    format!("{}.{}", LOCALIZATION_ACCESSOR, key)
}

/// Edits that externalize one literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Replaces the literal, delimiters included, with the lookup expression.
    pub replacement: TextEdit,
    /// Adds the import, unless the document already has it.
    pub import: Option<TextEdit>,
}

impl Rewrite {
    /// Replacement first, then the import. Both use offsets into the
    /// original text; [`EditPlan::apply`] takes care of ordering.
    pub fn into_plan(self) -> EditPlan {
        let mut edits = vec![self.replacement];
        edits.extend(self.import);
        EditPlan::new(edits)
    }
}

pub fn compute_rewrite(text: &str, literal: &LiteralMatch, key: &L10nKey) -> Rewrite {
    Rewrite {
        replacement: TextEdit::replace(literal.span(), lookup_expression(key)),
        import: import_insertion(text),
    }
}

/// Where and what to insert so the document imports the localizations.
///
/// `None` when [`IMPORT_DECLARATION`] already appears verbatim. Otherwise the
/// declaration goes on its own line after the last `import` directive, or
/// at the top of the file if there is none. The new line uses the
/// document's own line terminator.
pub fn import_insertion(text: &str) -> Option<TextEdit> {
    if text.contains(IMPORT_DECLARATION) {
        return None;
    }

    let eol = line_terminator(text);
    match last_import_end(text) {
        Some(offset) => Some(TextEdit::insert(offset, format!("{}{}", eol, IMPORT_DECLARATION))),
        None => Some(TextEdit::insert(0, format!("{}{}", IMPORT_DECLARATION, eol))),
    }
}

/// `\r\n` if the first line ends with it, `\n` otherwise.
fn line_terminator(text: &str) -> &'static str {
    match text.find('\n') {
        Some(pos) if text[..pos].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Offset just past the last `import` directive.
///
/// A directive may continue over several lines (`show`/`hide` clauses), so
/// its end is the first `;` after the `import` keyword. Without any `;`
/// it ends with its first line.
fn last_import_end(text: &str) -> Option<usize> {
    let start = last_import_start(text)?;
    let end = match text[start..].find(';') {
        Some(semicolon) => start + semicolon + 1,
        None => line_end(text, start),
    };
    Some(end)
}

/// Offset of the last line that starts with an `import` directive.
fn last_import_start(text: &str) -> Option<usize> {
    let mut offset = 0;
    let mut last = None;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with("import ") || trimmed.starts_with("import\t") {
            last = Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }

    last
}

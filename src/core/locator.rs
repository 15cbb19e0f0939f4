//! Literal Locator.
//!
//! Finds the string literal under a caret or selection. This is not a lexer:
//! each quoting convention is a regex, and the grammars are tried in a fixed
//! priority order until one yields a match containing the cursor.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::buffer::{Cursor, SourceBuffer, line_end, line_start};

// 'text' with backslash escapes
static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"'((?:\\.|[^'\\])*)'"#).unwrap());

// "text" with backslash escapes
static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""((?:\\.|[^"\\])*)""#).unwrap());

// '''text''' up to the earliest closing delimiter
static TRIPLE_SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)'''(.*?)'''"#).unwrap());

// """text""" up to the earliest closing delimiter
static TRIPLE_DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"""(.*?)""""#).unwrap());

/// Line prefixes of directives whose string operands are URIs, not UI text.
const DIRECTIVE_PREFIXES: &[&str] = &["import ", "export ", "part "];

/// A quoting convention for string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralGrammar {
    SingleQuoted,
    DoubleQuoted,
    TripleSingleQuoted,
    TripleDoubleQuoted,
}

impl LiteralGrammar {
    /// Grammars in the order they are tried. The first grammar that yields a
    /// match containing the cursor wins, even if a later grammar would have
    /// produced a wider match.
    pub const PRIORITY: [LiteralGrammar; 4] = [
        LiteralGrammar::SingleQuoted,
        LiteralGrammar::DoubleQuoted,
        LiteralGrammar::TripleSingleQuoted,
        LiteralGrammar::TripleDoubleQuoted,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            LiteralGrammar::SingleQuoted => &SINGLE_QUOTED,
            LiteralGrammar::DoubleQuoted => &DOUBLE_QUOTED,
            LiteralGrammar::TripleSingleQuoted => &TRIPLE_SINGLE_QUOTED,
            LiteralGrammar::TripleDoubleQuoted => &TRIPLE_DOUBLE_QUOTED,
        }
    }

    pub fn delimiter(self) -> &'static str {
        match self {
            LiteralGrammar::SingleQuoted => "'",
            LiteralGrammar::DoubleQuoted => "\"",
            LiteralGrammar::TripleSingleQuoted => "'''",
            LiteralGrammar::TripleDoubleQuoted => "\"\"\"",
        }
    }
}

/// A string literal found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralMatch {
    /// Offset of the opening delimiter.
    pub start: usize,
    /// Offset just past the closing delimiter.
    pub end: usize,
    /// Text between the delimiters. Escape sequences are kept verbatim.
    pub content: String,
    pub grammar: LiteralGrammar,
}

impl LiteralMatch {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    fn shifted(mut self, by: usize) -> Self {
        self.start += by;
        self.end += by;
        self
    }
}

/// Find the literal containing `offset_in_line` (inclusive of both ends).
///
/// Offsets in the returned match are relative to `line_text`.
pub fn locate(line_text: &str, offset_in_line: usize) -> Option<LiteralMatch> {
    locate_containing(line_text, offset_in_line..offset_in_line)
}

/// Find the first literal, in grammar priority order, whose span contains
/// the whole of `span`.
pub fn locate_containing(text: &str, span: Range<usize>) -> Option<LiteralMatch> {
    LiteralGrammar::PRIORITY.into_iter().find_map(|grammar| {
        grammar
            .pattern()
            .captures_iter(text)
            .find_map(|caps| {
                let whole = caps.get(0)?;
                if whole.start() <= span.start && span.end <= whole.end() {
                    Some(LiteralMatch {
                        start: whole.start(),
                        end: whole.end(),
                        content: caps.get(1).map_or("", |m| m.as_str()).to_string(),
                        grammar,
                    })
                } else {
                    None
                }
            })
    })
}

/// Locate the literal under the buffer's cursor, with absolute offsets.
///
/// A caret scans only its own line, so a triple-quoted literal spanning
/// several lines is not found. A selection scans every line it touches and
/// the literal must contain the whole selection. Literals on `import`,
/// `export` and `part` lines are ignored.
pub fn locate_at(buffer: &SourceBuffer<'_>) -> Option<LiteralMatch> {
    let scope = buffer.cursor_lines();
    let text = &buffer.text[scope.clone()];
    let relative = match buffer.cursor {
        Cursor::Caret(offset) => {
            let offset = offset.saturating_sub(scope.start);
            offset..offset
        }
        Cursor::Selection(range) => {
            range.start.saturating_sub(scope.start)..range.end.saturating_sub(scope.start)
        }
    };

    let found = locate_containing(text, relative)?.shifted(scope.start);

    if is_directive_line(buffer.text, found.start) {
        tracing::debug!(offset = found.start, "literal belongs to a directive, skipping");
        return None;
    }

    Some(found)
}

fn is_directive_line(text: &str, offset: usize) -> bool {
    let line = &text[line_start(text, offset)..line_end(text, offset)];
    let trimmed = line.trim_start();
    DIRECTIVE_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

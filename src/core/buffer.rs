use std::ops::Range;

/// Where the user is pointing inside a document.
///
/// Offsets are UTF-8 byte offsets into the document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    Caret(usize),
    Selection(Range<usize>),
}

impl Cursor {
    /// First offset covered by the cursor.
    pub fn start(&self) -> usize {
        match self {
            Cursor::Caret(offset) => *offset,
            Cursor::Selection(range) => range.start,
        }
    }

    /// Last offset covered by the cursor.
    pub fn end(&self) -> usize {
        match self {
            Cursor::Caret(offset) => *offset,
            Cursor::Selection(range) => range.end,
        }
    }

    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Cursor::Selection(range) if range.is_empty())
    }
}

/// A read-only view of the document being edited, plus the cursor.
///
/// The buffer is owned by the editing host. Nothing in the core mutates it;
/// edits are returned as an [`EditPlan`](super::EditPlan) for the host to apply.
#[derive(Debug, Clone, Copy)]
pub struct SourceBuffer<'a> {
    pub text: &'a str,
    pub cursor: &'a Cursor,
}

impl<'a> SourceBuffer<'a> {
    pub fn new(text: &'a str, cursor: &'a Cursor) -> Self {
        Self { text, cursor }
    }

    /// Byte range of the line(s) covering the cursor, excluding line terminators.
    ///
    /// For a selection this spans from the start of the selection's first line
    /// to the end of its last line.
    pub fn cursor_lines(&self) -> Range<usize> {
        let start = line_start(self.text, self.cursor.start());
        let end = line_end(self.text, self.cursor.end());
        start..end.max(start)
    }
}

/// Offset of the first byte of the line containing `offset`.
pub fn line_start(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    text.as_bytes()[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|pos| pos + 1)
        .unwrap_or(0)
}

/// Offset just past the last character of the line containing `offset`,
/// not counting the `\n` (or `\r\n`) terminator.
pub fn line_end(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    let end = text.as_bytes()[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|pos| offset + pos)
        .unwrap_or(text.len());
    if end > offset && text.as_bytes()[end - 1] == b'\r' {
        end - 1
    } else {
        end
    }
}

/// Convert a 1-based line and 1-based character column into a byte offset.
///
/// Columns past the end of the line clamp to the line end. Returns `None`
/// when the line does not exist.
pub fn offset_from_line_col(text: &str, line: usize, col: usize) -> Option<usize> {
    if line == 0 || col == 0 {
        return None;
    }

    let mut start = 0;
    for _ in 1..line {
        start += text[start..].find('\n')? + 1;
    }

    let end = line_end(text, start);
    let offset = text[start..end]
        .char_indices()
        .nth(col - 1)
        .map(|(i, _)| start + i)
        .unwrap_or(end);
    Some(offset)
}

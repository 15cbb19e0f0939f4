//! Edits as data.
//!
//! The core never mutates a document. It returns an [`EditPlan`] and the
//! host applies it through [`EditTarget`] as one transaction.

use std::{
    fs,
    ops::Range,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use crate::utils::write_atomic;

/// Replace `range` with `text`. An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub text: String,
}

impl TextEdit {
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset..offset, text)
    }

    pub fn is_insertion(&self) -> bool {
        self.range.is_empty()
    }
}

/// An ordered group of edits that must apply together or not at all.
///
/// Offsets in every edit refer to the original text. Edits are applied
/// back-to-front so earlier offsets stay valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPlan {
    edits: Vec<TextEdit>,
}

impl EditPlan {
    pub fn new(edits: Vec<TextEdit>) -> Self {
        Self { edits }
    }

    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply every edit to `text`, returning the new text.
    ///
    /// Fails without producing anything if an edit is out of bounds, splits
    /// a UTF-8 character, or overlaps another edit.
    pub fn apply(&self, text: &str) -> Result<String> {
        // Stable sort keeps the requested order for edits at the same offset.
        let mut ordered: Vec<&TextEdit> = self.edits.iter().collect();
        ordered.sort_by_key(|edit| (edit.range.start, edit.range.end));

        for edit in &ordered {
            let Range { start, end } = edit.range;
            if start > end || end > text.len() {
                bail!("Edit {}..{} is outside the document ({} bytes)", start, end, text.len());
            }
            if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
                bail!("Edit {}..{} does not fall on character boundaries", start, end);
            }
        }
        for pair in ordered.windows(2) {
            if pair[0].range.end > pair[1].range.start {
                bail!(
                    "Edits {}..{} and {}..{} overlap",
                    pair[0].range.start,
                    pair[0].range.end,
                    pair[1].range.start,
                    pair[1].range.end
                );
            }
        }

        let mut result = text.to_string();
        for edit in ordered.iter().rev() {
            result.replace_range(edit.range.clone(), &edit.text);
        }
        Ok(result)
    }
}

/// A document an [`EditPlan`] can be applied to.
pub trait EditTarget {
    fn apply_plan(&mut self, plan: &EditPlan) -> Result<()>;
}

impl EditTarget for String {
    fn apply_plan(&mut self, plan: &EditPlan) -> Result<()> {
        *self = plan.apply(self)?;
        Ok(())
    }
}

/// A source file on disk, edited as a whole.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    content: String,
}

impl SourceFile {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl EditTarget for SourceFile {
    /// Apply the plan in memory first, then write the file once.
    fn apply_plan(&mut self, plan: &EditPlan) -> Result<()> {
        if plan.is_empty() {
            return Ok(());
        }
        let updated = plan
            .apply(&self.content)
            .with_context(|| format!("Failed to edit {}", self.path.display()))?;
        write_atomic(&self.path, &updated)?;
        self.content = updated;
        Ok(())
    }
}

//! Resource Store Merger.
//!
//! Resource documents are flat JSON objects (ARB files), one per locale.
//! A merge writes one key/value pair into every document in the
//! localization directory, or into a single default document when the
//! directory has none yet.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde_json::{Map, Value};
use walkdir::WalkDir;

use super::key::L10nKey;
use crate::utils::write_atomic;

/// What a merge did to a key in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
    Unchanged,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Added => "added",
            KeyAction::Updated => "updated",
            KeyAction::Unchanged => "unchanged",
        }
    }
}

/// One locale's resource file, held in memory as an ordered JSON object.
///
/// Entries that are not plain strings (ARB `@key` metadata, `@@locale`) are
/// carried through untouched.
#[derive(Debug)]
pub struct ResourceDocument {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl ResourceDocument {
    /// Load a document, or start an empty one if the file is missing or blank.
    ///
    /// Malformed JSON and non-object roots are errors: the caller must not
    /// overwrite a file it could not read.
    pub fn open_or_create(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            if content.trim().is_empty() {
                Map::new()
            } else {
                let value: Value = serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
                match value {
                    Value::Object(map) => map,
                    _ => bail!("Root of resource file must be an object: {}", path.display()),
                }
            }
        } else {
            Map::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set `key` to `value`. An existing key keeps its position; a new key
    /// is appended.
    pub fn set(&mut self, key: &L10nKey, value: &str) -> KeyAction {
        let action = match self.entries.get(key.as_str()) {
            Some(Value::String(existing)) if existing == value => KeyAction::Unchanged,
            Some(_) => KeyAction::Updated,
            None => KeyAction::Added,
        };
        self.entries
            .insert(key.to_string(), Value::String(value.to_string()));
        action
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Pretty-printed JSON with 2-space indentation and a trailing newline.
    pub fn render(&self) -> Result<String> {
        let content = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize resource document")?;
        Ok(format!("{}\n", content))
    }

    /// Write the document back atomically.
    pub fn save(&self) -> Result<()> {
        write_atomic(&self.path, &self.render()?)
    }
}

/// A document that accepted the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    pub path: PathBuf,
    pub action: KeyAction,
}

/// A document that could not be read or written. Other documents are
/// unaffected.
#[derive(Debug, Clone)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a fan-out merge, sorted by path.
#[derive(Debug, Default)]
pub struct MergeReport {
    /// True when the directory held no resource documents and the default
    /// document was synthesized.
    pub created_default: bool,
    pub written: Vec<WrittenDocument>,
    pub failed: Vec<DocumentFailure>,
}

impl MergeReport {
    pub fn paths_written(&self) -> Vec<&Path> {
        self.written.iter().map(|doc| doc.path.as_path()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// No document accepted the key.
    pub fn is_total_failure(&self) -> bool {
        self.written.is_empty()
    }
}

/// The localization directory and its naming convention.
#[derive(Debug, Clone)]
pub struct ResourceStore {
    dir: PathBuf,
    extension: String,
    default_file_name: String,
}

impl ResourceStore {
    /// `extension` is given without the leading dot. The default document is
    /// named `<prefix>_<locale>.<extension>`.
    pub fn new(dir: impl Into<PathBuf>, extension: &str, prefix: &str, locale: &str) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.to_string(),
            default_file_name: format!("{}_{}.{}", prefix, locale, extension),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn default_document(&self) -> PathBuf {
        self.dir.join(&self.default_file_name)
    }

    /// Resource documents directly under the directory, sorted by file name.
    /// A missing directory has none.
    pub fn documents(&self) -> Vec<PathBuf> {
        if !self.dir.is_dir() {
            return Vec::new();
        }

        WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.dir.display(), err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| self.is_resource_file(path))
            .collect()
    }

    fn is_resource_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }

    /// Documents a merge would write: every existing document, or the
    /// default one when there are none.
    pub fn targets(&self) -> (Vec<PathBuf>, bool) {
        let documents = self.documents();
        if documents.is_empty() {
            (vec![self.default_document()], true)
        } else {
            (documents, false)
        }
    }

    /// Write `key → value` into every target document.
    ///
    /// Each document is an independent read-modify-write, so they run in
    /// parallel. A failure in one document is recorded in the report and
    /// does not undo or prevent the others. Only failing to create a
    /// missing directory aborts the merge.
    pub fn merge(&self, key: &L10nKey, value: &str) -> Result<MergeReport> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;
            tracing::info!("Created localization directory {}", self.dir.display());
        }

        let (targets, created_default) = self.targets();

        let results: Vec<(PathBuf, Result<KeyAction>)> = targets
            .into_par_iter()
            .map(|path| {
                let result = merge_document(&path, key, value);
                (path, result)
            })
            .collect();

        let mut report = MergeReport {
            created_default,
            ..Default::default()
        };
        for (path, result) in results {
            match result {
                Ok(action) => {
                    tracing::debug!(key = %key, "{} {}", action.as_str(), path.display());
                    report.written.push(WrittenDocument { path, action });
                }
                Err(err) => {
                    tracing::warn!("Failed to merge {} into {}: {:#}", key, path.display(), err);
                    report.failed.push(DocumentFailure {
                        path,
                        error: format!("{:#}", err),
                    });
                }
            }
        }
        report.written.sort_by(|a, b| a.path.cmp(&b.path));
        report.failed.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(report)
    }
}

fn merge_document(path: &Path, key: &L10nKey, value: &str) -> Result<KeyAction> {
    let mut document = ResourceDocument::open_or_create(path)?;
    let action = document.set(key, value);
    document.save()?;
    Ok(action)
}

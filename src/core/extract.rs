//! End-to-end extraction of one literal.
//!
//! ```text
//! locate literal → derive key → merge into resources → rewrite source → hook
//! ```
//!
//! Nothing is written when the cursor is not on a literal or the literal
//! yields no usable key.

use std::path::PathBuf;

use anyhow::Result;

use super::buffer::SourceBuffer;
use super::edit::{EditPlan, EditTarget};
use super::hook::{HookOutcome, ProcessRunner, run_post_merge_hook};
use super::key::L10nKey;
use super::locator::{LiteralMatch, locate_at};
use super::resource::{MergeReport, ResourceStore};
use super::rewrite::compute_rewrite;

/// Why an extraction did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No literal contains the cursor.
    NoLiteral,
    /// The literal has no characters a key can be built from.
    EmptyKey { content: String },
}

/// A literal that was (or, in a dry run, would be) externalized.
#[derive(Debug)]
pub struct Extracted {
    pub literal: LiteralMatch,
    pub key: L10nKey,
    /// Edits for the source document.
    pub plan: EditPlan,
    /// Resource documents the key goes into.
    pub targets: Vec<PathBuf>,
    /// `None` in a dry run.
    pub merge: Option<MergeReport>,
    /// Whether the source edits were applied.
    pub rewritten: bool,
    /// `None` when no hook is configured or nothing was committed.
    pub hook: Option<HookOutcome>,
}

impl Extracted {
    /// The value stored under the key.
    pub fn value(&self) -> &str {
        &self.literal.content
    }

    /// The source is rewritten only if at least one resource document holds
    /// the key. Otherwise the lookup would point at nothing.
    pub fn should_rewrite(&self) -> bool {
        self.merge
            .as_ref()
            .is_some_and(|report| !report.is_total_failure())
    }
}

#[derive(Debug)]
pub enum Extraction {
    Skipped(SkipReason),
    Extracted(Extracted),
}

struct PostMergeHook {
    runner: Box<dyn ProcessRunner>,
    project_root: PathBuf,
}

pub struct Extractor {
    store: ResourceStore,
    hook: Option<PostMergeHook>,
}

impl Extractor {
    pub fn new(store: ResourceStore) -> Self {
        Self { store, hook: None }
    }

    /// Run `runner`'s dependency refresh in `project_root` after each commit.
    pub fn with_hook(mut self, runner: Box<dyn ProcessRunner>, project_root: impl Into<PathBuf>) -> Self {
        self.hook = Some(PostMergeHook {
            runner,
            project_root: project_root.into(),
        });
        self
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Locate the literal under the cursor and derive its key.
    pub fn prepare(buffer: &SourceBuffer<'_>) -> Result<(LiteralMatch, L10nKey), SkipReason> {
        let literal = locate_at(buffer).ok_or(SkipReason::NoLiteral)?;
        let key = L10nKey::derive(&literal.content).ok_or_else(|| SkipReason::EmptyKey {
            content: literal.content.clone(),
        })?;
        Ok((literal, key))
    }

    /// Everything [`extract`](Self::extract) would do, without touching any file.
    pub fn preview(&self, buffer: &SourceBuffer<'_>) -> Extraction {
        match Self::prepare(buffer) {
            Ok((literal, key)) => {
                let plan = compute_rewrite(buffer.text, &literal, &key).into_plan();
                let (targets, _) = self.store.targets();
                Extraction::Extracted(Extracted {
                    literal,
                    key,
                    plan,
                    targets,
                    merge: None,
                    rewritten: false,
                    hook: None,
                })
            }
            Err(reason) => Extraction::Skipped(reason),
        }
    }

    /// Merge the literal into the resources and compute the source edits.
    ///
    /// The edits are not applied yet; pass the result to
    /// [`commit`](Self::commit) along with the document.
    pub fn extract(&self, buffer: &SourceBuffer<'_>) -> Result<Extraction> {
        let (literal, key) = match Self::prepare(buffer) {
            Ok(prepared) => prepared,
            Err(reason) => {
                tracing::debug!(?reason, "nothing to extract");
                return Ok(Extraction::Skipped(reason));
            }
        };

        tracing::info!(key = %key, "extracting {:?}", literal.content);
        let report = self.store.merge(&key, &literal.content)?;
        let plan = compute_rewrite(buffer.text, &literal, &key).into_plan();
        let targets = report
            .written
            .iter()
            .map(|doc| doc.path.clone())
            .chain(report.failed.iter().map(|failure| failure.path.clone()))
            .collect();

        Ok(Extraction::Extracted(Extracted {
            literal,
            key,
            plan,
            targets,
            merge: Some(report),
            rewritten: false,
            hook: None,
        }))
    }

    /// Apply the source edits to `target` and run the hook.
    ///
    /// Does nothing to the source when no resource document accepted the key.
    /// Hook failures are recorded in `extracted.hook`, never returned.
    pub fn commit<T: EditTarget>(&self, extracted: &mut Extracted, target: &mut T) -> Result<()> {
        if !extracted.should_rewrite() {
            tracing::warn!(key = %extracted.key, "no resource document accepted the key, source left unchanged");
            return Ok(());
        }

        target.apply_plan(&extracted.plan)?;
        extracted.rewritten = true;

        if let Some(hook) = &self.hook {
            extracted.hook = Some(run_post_merge_hook(hook.runner.as_ref(), &hook.project_root));
        }
        Ok(())
    }
}

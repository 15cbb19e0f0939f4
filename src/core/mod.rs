//! Core extraction engine.
//!
//! Independent of any editor or CLI: the host supplies the document text
//! and cursor, and receives edits back as data.
//!
//! ## Modules
//!
//! - `buffer`: document view, cursor and line arithmetic
//! - `locator`: find the string literal under the cursor
//! - `key`: derive a resource key from literal text
//! - `resource`: merge a key into every resource document
//! - `rewrite`: lookup expression and import insertion
//! - `edit`: edit plans and the host-side [`EditTarget`] seam
//! - `hook`: best-effort post-merge dependency refresh
//! - `context`: whether the action applies in an editing context
//! - `extract`: the end-to-end pipeline

pub mod buffer;
pub mod context;
pub mod edit;
pub mod extract;
pub mod hook;
pub mod key;
pub mod locator;
pub mod resource;
pub mod rewrite;

pub use buffer::{Cursor, SourceBuffer};
pub use context::{EditContext, TriggerMode, is_applicable};
pub use edit::{EditPlan, EditTarget, SourceFile, TextEdit};
pub use extract::{Extracted, Extraction, Extractor, SkipReason};
pub use hook::{CommandOutput, HookOutcome, ProcessRunner, SystemRunner, run_post_merge_hook};
pub use key::{L10nKey, derive_key};
pub use locator::{LiteralGrammar, LiteralMatch, locate, locate_at};
pub use resource::{KeyAction, MergeReport, ResourceDocument, ResourceStore};
pub use rewrite::{IMPORT_DECLARATION, LOCALIZATION_ACCESSOR, Rewrite, compute_rewrite};

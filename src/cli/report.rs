//! Report formatting and printing utilities.
//!
//! Separate from core logic so the engine can be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{
    Extracted, LiteralMatch, SkipReason,
    buffer::{line_end, line_start},
    hook::HookOutcome,
    resource::MergeReport,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Paths and text needed to describe an extraction to the user.
pub struct ReportContext<'a> {
    /// Paths are shown relative to this directory when possible.
    pub project_root: &'a Path,
    pub source_path: &'a Path,
    /// Source text before any edit.
    pub text: &'a str,
}

impl ReportContext<'_> {
    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(self.project_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// 1-based line and column (in characters) of `offset`.
fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let line = text[..offset].matches('\n').count() + 1;
    let col = text[line_start(text, offset)..offset].chars().count() + 1;
    (line, col)
}

/// Print the result of an applied extraction.
pub fn print_extracted(extracted: &Extracted, ctx: &ReportContext<'_>) {
    print_extracted_to(extracted, ctx, &mut io::stdout().lock());
}

pub fn print_extracted_to<W: Write>(extracted: &Extracted, ctx: &ReportContext<'_>, writer: &mut W) {
    let Some(report) = &extracted.merge else {
        return;
    };

    if !report.is_total_failure() {
        let _ = writeln!(
            writer,
            "{} Extracted {} as {}",
            SUCCESS_MARK.green(),
            format!("{:?}", extracted.value()).bold(),
            extracted.key.as_str().cyan()
        );
        for doc in &report.written {
            let _ = writeln!(
                writer,
                "  {}: {}",
                ctx.display_path(&doc.path),
                doc.action.as_str().green()
            );
        }
        if extracted.rewritten {
            let import_added = extracted.plan.edits().iter().any(|edit| edit.is_insertion());
            let _ = writeln!(
                writer,
                "  {}: {}",
                ctx.display_path(ctx.source_path),
                if import_added {
                    "rewritten, import added"
                } else {
                    "rewritten"
                }
            );
        }
    }

    print_merge_failures_to(report, ctx, writer);

    if let Some(outcome @ HookOutcome::Succeeded) = &extracted.hook {
        let _ = writeln!(writer, "  {}", outcome.to_string().dimmed());
    }
}

fn print_merge_failures_to<W: Write>(report: &MergeReport, ctx: &ReportContext<'_>, writer: &mut W) {
    if report.failed.is_empty() {
        return;
    }

    let count = report.failed.len();
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!(
            "Failed to update {} resource {}:",
            count,
            if count == 1 { "file" } else { "files" }
        )
        .red()
    );
    for failure in &report.failed {
        let _ = writeln!(
            writer,
            "  {}: {}",
            ctx.display_path(&failure.path),
            failure.error
        );
    }
    if report.is_total_failure() {
        let _ = writeln!(
            writer,
            "  {} {} was left unchanged",
            "note:".bold(),
            ctx.display_path(ctx.source_path)
        );
    }
}

/// Print what an extraction would do, pointing at the literal.
pub fn print_preview(extracted: &Extracted, ctx: &ReportContext<'_>) {
    print_preview_to(extracted, ctx, &mut io::stdout().lock());
}

pub fn print_preview_to<W: Write>(extracted: &Extracted, ctx: &ReportContext<'_>, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Would extract {} as {}",
        format!("{:?}", extracted.value()).bold(),
        extracted.key.as_str().cyan()
    );

    print_literal_context(&extracted.literal, ctx, writer);

    for edit in extracted.plan.edits() {
        let (label, text) = if edit.is_insertion() {
            ("add import", edit.text.trim())
        } else {
            ("replace with", edit.text.as_str())
        };
        let _ = writeln!(writer, "   {} {}: {}", "=".blue(), label, text);
    }

    let targets = extracted
        .targets
        .iter()
        .map(|path| {
            let shown = ctx.display_path(path);
            if path.exists() {
                shown
            } else {
                format!("{} (new)", shown)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(writer, "   {} resource files: {}", "=".blue(), targets);
}

/// Cargo-style `-->` location, source line and carets under the literal.
fn print_literal_context<W: Write>(literal: &LiteralMatch, ctx: &ReportContext<'_>, writer: &mut W) {
    let (line, col) = line_col(ctx.text, literal.start);
    let source_line = &ctx.text[line_start(ctx.text, literal.start)..line_end(ctx.text, literal.start)];
    let width = line.to_string().len();

    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        ctx.display_path(ctx.source_path),
        line,
        col
    );
    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = width
    );

    // Multi-line literals are underlined to the end of their first line.
    let prefix: String = source_line.chars().take(col - 1).collect();
    let underlined_end = literal.end.min(line_end(ctx.text, literal.start));
    let underlined = &ctx.text[literal.start..underlined_end];
    let carets = "^".repeat(UnicodeWidthStr::width(underlined).max(1));
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        carets.yellow(),
        width = width,
        padding = UnicodeWidthStr::width(prefix.as_str())
    );
}

/// Explain why nothing was extracted.
pub fn print_skipped(reason: &SkipReason, ctx: &ReportContext<'_>, cursor_start: usize) {
    print_skipped_to(reason, ctx, cursor_start, &mut io::stderr().lock());
}

pub fn print_skipped_to<W: Write>(
    reason: &SkipReason,
    ctx: &ReportContext<'_>,
    cursor_start: usize,
    writer: &mut W,
) {
    let message = match reason {
        SkipReason::NoLiteral => {
            let (line, col) = line_col(ctx.text, cursor_start);
            format!(
                "No string literal at {}:{}:{}",
                ctx.display_path(ctx.source_path),
                line,
                col
            )
        }
        SkipReason::EmptyKey { content } => {
            format!("Cannot build a key from {:?}: no letters or digits", content)
        }
    };
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), message.red());
}

/// Explain why extraction is not offered here.
pub fn print_not_applicable(reason: &str) {
    print_not_applicable_to(reason, &mut io::stderr().lock());
}

pub fn print_not_applicable_to<W: Write>(reason: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), reason.red());
}

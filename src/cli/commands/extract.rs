use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::super::args::{CommonArgs, ExtractCommand};
use super::super::exit_status::ExitStatus;
use super::super::report::{
    ReportContext, print_extracted, print_not_applicable, print_preview, print_skipped,
};
use crate::config::{Config, ConfigLoadResult, load_config};
use crate::core::{
    Cursor, EditContext, Extraction, Extractor, SkipReason, SourceBuffer, SourceFile,
    SystemRunner, TriggerMode, context::has_source_extension, is_applicable,
};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let ExtractCommand {
        file,
        position,
        common,
        mode,
        dry_run,
        no_hook,
    } = cmd;

    let file = fs::canonicalize(&file)
        .with_context(|| format!("Failed to resolve path: {}", file.display()))?;
    let start_dir = file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let ConfigLoadResult {
        mut config,
        project_root,
        from_file,
    } = load_config(&start_dir)?;
    apply_overrides(&mut config, &common, mode, no_hook);
    config.validate()?;
    tracing::debug!(
        from_file,
        "Project root {}, resources in {}",
        project_root.display(),
        config.l10n_dir
    );

    let mut source = SourceFile::open(&file)?;
    let text = source.content().to_string();
    let cursor = position.resolve(&text)?;
    let buffer = SourceBuffer::new(&text, &cursor);
    let ctx = ReportContext {
        project_root: &project_root,
        source_path: &file,
        text: &text,
    };

    let edit_context = EditContext {
        file_path: Some(file.as_path()),
        buffer,
    };
    if !is_applicable(&edit_context, config.trigger_mode, &config.source_extensions) {
        match not_applicable_reason(&edit_context, &config) {
            Some(reason) => print_not_applicable(&reason),
            None => print_skipped(&SkipReason::NoLiteral, &ctx, cursor.start()),
        }
        return Ok(ExitStatus::Failure);
    }

    let mut extractor = Extractor::new(config.resource_store(&project_root));
    if config.run_hook && !dry_run {
        extractor = extractor.with_hook(Box::new(SystemRunner), project_root.clone());
    }

    if dry_run {
        return Ok(match extractor.preview(&buffer) {
            Extraction::Skipped(reason) => {
                print_skipped(&reason, &ctx, cursor.start());
                ExitStatus::Failure
            }
            Extraction::Extracted(extracted) => {
                print_preview(&extracted, &ctx);
                ExitStatus::Success
            }
        });
    }

    let mut extracted = match extractor.extract(&buffer)? {
        Extraction::Skipped(reason) => {
            print_skipped(&reason, &ctx, cursor.start());
            return Ok(ExitStatus::Failure);
        }
        Extraction::Extracted(extracted) => extracted,
    };

    extractor.commit(&mut extracted, &mut source)?;
    print_extracted(&extracted, &ctx);

    let complete = extracted
        .merge
        .as_ref()
        .is_some_and(|report| report.is_complete());
    if complete && extracted.rewritten {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}

fn apply_overrides(
    config: &mut Config,
    common: &CommonArgs,
    mode: Option<TriggerMode>,
    no_hook: bool,
) {
    if let Some(dir) = &common.l10n_dir {
        config.l10n_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(locale) = &common.default_locale {
        config.default_locale = locale.clone();
    }
    if let Some(mode) = mode {
        config.trigger_mode = mode;
    }
    if no_hook {
        config.run_hook = false;
    }
}

/// Why extraction is not offered, or `None` when the only problem is that
/// no literal is under the caret.
fn not_applicable_reason(ctx: &EditContext<'_>, config: &Config) -> Option<String> {
    match (config.trigger_mode, ctx.buffer.cursor) {
        (TriggerMode::Caret, Cursor::Selection(_)) => Some(
            "--selection needs selection mode (pass --mode selection or set \"triggerMode\")"
                .to_string(),
        ),
        (TriggerMode::Selection, Cursor::Caret(_)) => {
            Some("Selection mode needs --selection START..END".to_string())
        }
        (TriggerMode::Selection, Cursor::Selection(_)) => Some("The selection is empty".to_string()),
        (TriggerMode::Caret, Cursor::Caret(_)) => {
            let path = ctx.file_path?;
            if has_source_extension(path, &config.source_extensions) {
                None
            } else {
                let expected = config
                    .source_extensions
                    .iter()
                    .map(|ext| format!(".{}", ext))
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!(
                    "{} is not a source file (expected {})",
                    path.display(),
                    expected
                ))
            }
        }
    }
}

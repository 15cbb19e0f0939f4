//! Common utility functions shared across the codebase.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Replace the contents of `path` so that readers see either the old or the
/// new content, never a partial write.
///
/// The content goes to a temporary file in the same directory, which is
/// then renamed over the target. Missing parent directories are created.
/// The target's permissions are preserved.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    if let Some(permissions) = target_permissions(path) {
        fs::set_permissions(tmp.path(), permissions)
            .with_context(|| format!("Failed to set permissions for {}", path.display()))?;
    }
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

/// Permissions the replacement file should carry: those of the file being
/// replaced, or the usual 0644 for a new file.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(0o644))
    }

    #[cfg(not(unix))]
    {
        None
    }
}

/// Files and directories that mark the root of a project.
pub const PROJECT_MARKERS: &[&str] = &["pubspec.yaml", ".git"];

/// The nearest ancestor of `start` (itself included) holding a
/// `pubspec.yaml` or a `.git` directory.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| PROJECT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

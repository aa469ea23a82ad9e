//! Output sink for the rendered dictionary.
//!
//! The document is written in one go after every fetch succeeded. Files are
//! staged in a temp file next to the destination and renamed over it, so a
//! failed run never leaves a truncated `.bzl` behind.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where the document goes. `-` selects standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(arg))
        }
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputTarget::Stdout => f.write_str("<stdout>"),
            OutputTarget::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Writes `content` to `target`.
pub fn write_document(target: &OutputTarget, content: &str) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let mut out = std::io::stdout().lock();
            out.write_all(content.as_bytes()).context("write to stdout")?;
            out.flush().context("flush stdout")?;
        }
        OutputTarget::File(path) => write_atomic(path, content)?,
    }
    Ok(())
}

/// Stages `content` in a temp file in the destination directory, syncs it and
/// renames it over `path`. The result has the mode of the file it replaces,
/// or the umask default for a new file, as a plain `open` would give.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = staging_builder()
        .tempfile_in(&dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .with_context(|| format!("failed to copy permissions of {}", path.display()))?;
    }
    tmp.write_all(content.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.path().display()))?;
    tmp.as_file().sync_all().context("output sync failed")?;
    tmp.persist(path)
        .with_context(|| format!("failed to rename temp file to {}", path.display()))?;
    tracing::info!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Temp files default to 0600; request 0666 so the umask applies like it
/// does for `File::create`.
#[cfg(unix)]
fn staging_builder() -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;
    let mut builder = tempfile::Builder::new();
    builder.permissions(fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn staging_builder() -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}

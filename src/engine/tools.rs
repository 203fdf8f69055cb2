//! Path and filter utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::utils::config::DB_SIDECAR_SUFFIXES;

/// Path as stored in the baseline: lossy UTF-8 with backslashes normalized to `/`.
pub fn path_to_db_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Canonicalize `path`, falling back to the path itself when it does not exist yet.
fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Paths that must never be dispatched: each of `paths` plus its SQLite sidecars, canonicalized
/// when they exist so they compare equal to the listed children of the root.
pub fn excluded_paths_for(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::with_capacity(paths.len() * (DB_SIDECAR_SUFFIXES.len() + 1));
    for p in paths {
        let canonical = canonical_or_self(p);
        if let Some(name) = canonical.file_name().map(|n| n.to_string_lossy().into_owned()) {
            for suffix in DB_SIDECAR_SUFFIXES {
                out.push(canonical.with_file_name(format!("{name}{suffix}")));
            }
        }
        out.push(canonical);
    }
    out
}

/// True if `path` is one of `excluded` (compared after canonicalizing `path`'s parent).
pub fn is_excluded(path: &Path, excluded: &[PathBuf]) -> bool {
    if excluded.is_empty() {
        return false;
    }
    let resolved = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => canonical_or_self(parent).join(name),
        _ => path.to_path_buf(),
    };
    excluded.iter().any(|e| *e == resolved)
}

/// Fail early with a clear message when `root` is missing or not a directory.
pub fn check_root_dir(root: &Path) -> Result<()> {
    let meta = std::fs::metadata(root)
        .with_context(|| format!("read directory metadata for {}", root.display()))?;
    if !meta.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }
    Ok(())
}

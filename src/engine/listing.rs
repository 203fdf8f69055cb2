//! Directory listing: immediate children of the root, largest first.

use anyhow::{Context, Result};
use log::warn;
use std::fs::FileType;
use std::path::Path;

use crate::{EntryKind, ListedEntry};

fn kind_of(ft: FileType) -> EntryKind {
    if ft.is_symlink() {
        EntryKind::Symlink
    } else if ft.is_dir() {
        EntryKind::Dir
    } else if ft.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

/// List the immediate children of `root` (no recursion, links not followed), sorted by
/// descending size. Ties sort by path so the order is stable across runs.
///
/// Failing to open or iterate `root` is an error. An entry whose metadata cannot be read is kept
/// with size 0; the worker that picks it up reports the real failure.
pub fn list_dir_by_size(root: &Path) -> Result<Vec<ListedEntry>> {
    let read_dir =
        std::fs::read_dir(root).with_context(|| format!("read directory {}", root.display()))?;

    let mut entries = Vec::new();
    for item in read_dir {
        let item = item.with_context(|| format!("read directory entry in {}", root.display()))?;
        let path = root.join(item.file_name());
        let kind = match item.file_type() {
            Ok(ft) => kind_of(ft),
            Err(e) => {
                warn!("Cannot read file type of {}: {}", path.display(), e);
                EntryKind::Other
            }
        };
        let size = item.metadata().map(|m| m.len()).unwrap_or(0);
        entries.push(ListedEntry { path, size, kind });
    }

    entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}

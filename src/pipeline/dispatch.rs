//! Work dispatcher: feeds regular files into the task queue in listing order.

use crossbeam_channel::Sender;
use log::debug;
use std::io;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crate::engine::tools::is_excluded;
use crate::{EntryKind, ListedEntry};

/// True if the entry is a regular file that is not excluded. Directories, symlinks and
/// other special files are never hashed.
pub fn should_dispatch(entry: &ListedEntry, excluded: &[PathBuf]) -> bool {
    match entry.kind {
        EntryKind::File => !is_excluded(&entry.path, excluded),
        EntryKind::Dir => false,
        EntryKind::Symlink | EntryKind::Other => {
            debug!("Skipping non-regular file {}", entry.path.display());
            false
        }
    }
}

/// Send every dispatchable entry's path on `task_tx` exactly once, in order, then drop the
/// sender so workers see the end of input. Returns the number of tasks sent.
pub fn run_dispatch_loop(
    task_tx: Sender<PathBuf>,
    entries: Vec<ListedEntry>,
    excluded: &[PathBuf],
) -> usize {
    let mut count = 0_usize;
    for entry in entries {
        if !should_dispatch(&entry, excluded) {
            continue;
        }
        // Blocks while the queue is full; fails only if every worker is gone.
        if task_tx.send(entry.path).is_err() {
            break;
        }
        count += 1;
    }
    drop(task_tx);
    count
}

pub fn spawn_dispatch_thread(
    task_tx: Sender<PathBuf>,
    entries: Vec<ListedEntry>,
    excluded: Vec<PathBuf>,
) -> io::Result<JoinHandle<usize>> {
    thread::Builder::new()
        .name("dispatch".into())
        .spawn(move || run_dispatch_loop(task_tx, entries, &excluded))
}

use crossbeam_channel::{Receiver, Sender};
use log::warn;
use std::io;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crate::engine::hashing::hash_file;
use crate::{HashFailure, HashResult};

/// Single hashing worker: take paths until the queue is closed and empty, send one result per
/// hashed file. A file that cannot be read is logged and dropped, never retried.
fn hash_worker_loop(task_rx: Receiver<PathBuf>, result_tx: Sender<HashResult>) -> Vec<HashFailure> {
    let mut failures = Vec::new();
    while let Ok(path) = task_rx.recv() {
        match hash_file(&path) {
            Ok(digest) => {
                if result_tx.send(HashResult { path, digest }).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("Error computing hash for {}: {}", path.display(), e);
                failures.push(HashFailure {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }
    drop(result_tx);
    failures
}

/// Spawn `num_workers` hashing workers. Caller must drop its own `result_tx` after this so the
/// result channel closes once the last worker exits.
pub fn spawn_hash_workers(
    task_rx: Receiver<PathBuf>,
    result_tx: &Sender<HashResult>,
    num_workers: usize,
) -> io::Result<Vec<JoinHandle<Vec<HashFailure>>>> {
    (0..num_workers)
        .map(|worker_id| {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            thread::Builder::new()
                .name(format!("hash-{worker_id}"))
                .spawn(move || hash_worker_loop(task_rx, result_tx))
        })
        .collect()
}

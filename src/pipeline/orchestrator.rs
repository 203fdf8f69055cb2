use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::Path;
use std::thread::JoinHandle;

use crate::engine::listing::list_dir_by_size;
use crate::engine::tools::excluded_paths_for;
use crate::pipeline::{self, PoolHandles, PoolSummary, PoolTuning};
use crate::utils::Colors;
use crate::utils::fd_limit::effective_workers;
use crate::{HashFailure, HashResult, ListedEntry, Opts};

/// Worker count and queue depth for `opts`, after the FD-limit cap.
pub fn setup_pool_tuning(opts: &Opts) -> PoolTuning {
    let tuning = PoolTuning::for_workers(effective_workers(opts.workers));
    debug!(
        "Hashing with {} workers (queue depth {})",
        tuning.num_workers, tuning.channel_cap
    );
    tuning
}

/// Start the dispatch + hashing pipeline over `entries` (already in dispatch order).
/// Caller drains `result_rx` and then joins with [`shutdown_pool_handles`].
pub fn run_pool(entries: Vec<ListedEntry>, opts: &Opts) -> Result<PoolHandles> {
    let tuning = setup_pool_tuning(opts);
    let channels = pipeline::create_pool_channels(&tuning);
    let excluded = excluded_paths_for(&opts.exclude_paths);

    let dispatch_handle = pipeline::spawn_dispatch_thread(channels.task_tx, entries, excluded)
        .context("spawn dispatch thread")?;

    let worker_handles =
        pipeline::spawn_hash_workers(channels.task_rx, &channels.result_tx, tuning.num_workers)
            .context("spawn hash workers")?;

    // Dropping the last sender here means the result channel closes only after every worker exits.
    drop(channels.result_tx);

    Ok(PoolHandles {
        result_rx: channels.result_rx,
        dispatch_handle,
        worker_handles,
    })
}

/// Join dispatcher and workers (after the result stream is drained) and gather their totals.
pub fn shutdown_pool_handles(
    dispatch_handle: JoinHandle<usize>,
    worker_handles: Vec<JoinHandle<Vec<HashFailure>>>,
) -> Result<PoolSummary> {
    let dispatched = dispatch_handle
        .join()
        .map_err(|_| anyhow::anyhow!("dispatch thread panicked"))?;
    let mut failures = Vec::new();
    for h in worker_handles {
        let worker_failures = h
            .join()
            .map_err(|_| anyhow::anyhow!("hash worker panicked"))?;
        failures.extend(worker_failures);
    }
    Ok(PoolSummary {
        dispatched,
        failures,
    })
}

/// Warn about files that could not be hashed; list them when verbose.
pub fn report_skipped_files(opts: &Opts, summary: &PoolSummary) {
    if summary.failures.is_empty() {
        return;
    }
    warn!(
        "{}",
        Colors::colorize(
            Colors::SKIPPED,
            &format!(
                "Skipped {} of {} files that could not be read",
                summary.failures.len(),
                summary.dispatched
            )
        )
    );
    if opts.verbose {
        for f in &summary.failures {
            eprintln!("  skipped: {} ({})", f.path.display(), f.error);
        }
    }
}

/// List `root`, hash every regular file, and collect all results. No baseline involved.
/// Dispatcher → task channel → workers → result channel → Vec.
pub fn hash_all(root: &Path, opts: &Opts) -> Result<(Vec<HashResult>, PoolSummary)> {
    let entries = list_dir_by_size(root)?;
    let PoolHandles {
        result_rx,
        dispatch_handle,
        worker_handles,
    } = run_pool(entries, opts)?;

    let mut results = Vec::new();
    while let Ok(result) = result_rx.recv() {
        results.push(result);
    }
    debug!("main: channel closed, total {} results", results.len());

    let summary = shutdown_pool_handles(dispatch_handle, worker_handles)?;
    Ok((results, summary))
}

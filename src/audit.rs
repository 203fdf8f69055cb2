//! One end-to-end audit run: list, hash in parallel, reconcile, classify.

use anyhow::Result;
use log::{debug, info};
use std::io::Write;
use std::path::Path;

use crate::engine::db_ops::{Baseline, SqliteBaseline};
use crate::engine::listing::list_dir_by_size;
use crate::engine::reconcile::reconcile;
use crate::engine::tools::check_root_dir;
use crate::pipeline::{
    PoolHandles, PoolSummary, report_skipped_files, run_pool, shutdown_pool_handles,
};
use crate::utils::Colors;
use crate::{ListedEntry, Opts, RunState, Verdict};

/// Everything a run produced.
#[derive(Debug)]
pub struct AuditReport {
    pub state: RunState,
    pub verdict: Verdict,
    pub pool: PoolSummary,
}

impl AuditReport {
    /// Full log text (what gets printed and sent as the notification body).
    pub fn body(&self) -> String {
        self.state.report()
    }
}

/// Check that `root` is a directory and list it. Runs before the baseline is opened so a bad
/// `root` leaves nothing behind on disk.
pub fn list_root(root: &Path) -> Result<Vec<ListedEntry>> {
    check_root_dir(root)?;
    let entries = list_dir_by_size(root)?;
    debug!("Listed {} entries in {}", entries.len(), root.display());
    Ok(entries)
}

/// Hash and reconcile already-listed `entries` against an open `baseline`. Match notices are
/// written to `out` as they happen; the log is returned in the report, not printed.
///
/// Only a panicked or unspawnable pipeline thread is an error. Per-file problems end up in the
/// report.
pub fn audit_entries<B, W>(
    entries: Vec<ListedEntry>,
    baseline: &mut B,
    opts: &Opts,
    out: &mut W,
) -> Result<AuditReport>
where
    B: Baseline + ?Sized,
    W: Write + ?Sized,
{
    let PoolHandles {
        result_rx,
        dispatch_handle,
        worker_handles,
    } = run_pool(entries, opts)?;

    let state = reconcile(result_rx, baseline, out);
    let pool = shutdown_pool_handles(dispatch_handle, worker_handles)?;
    report_skipped_files(opts, &pool);

    let verdict = state.verdict();
    log_summary(&state, verdict);
    Ok(AuditReport {
        state,
        verdict,
        pool,
    })
}

/// List `root`, then open the baseline at `baseline_path`, audit, and close the baseline.
/// The baseline file itself is never hashed, even when it lives inside `root`.
pub fn audit_dir<W>(
    baseline_path: &Path,
    root: &Path,
    opts: &Opts,
    out: &mut W,
) -> Result<AuditReport>
where
    W: Write + ?Sized,
{
    let entries = list_root(root)?;
    let mut opts = opts.clone();
    opts.exclude_paths.push(baseline_path.to_path_buf());
    let mut baseline = SqliteBaseline::open(baseline_path)?;
    let report = audit_entries(entries, &mut baseline, &opts, out)?;
    baseline.close()?;
    Ok(report)
}

fn log_summary(state: &RunState, verdict: Verdict) {
    info!(
        "{} | {} | {} | errors: {}",
        Colors::colorize(Colors::MATCHED, &format!("Matched: {}", state.success_count)),
        Colors::colorize(Colors::NEW, &format!("New: {}", state.inserted)),
        Colors::colorize(Colors::MISMATCHED, &format!("Mismatched: {}", state.mismatched)),
        state.errors
    );
    debug!("Verdict: {}", verdict);
}

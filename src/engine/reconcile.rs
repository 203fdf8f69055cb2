//! Reconciler: the single consumer of hash results and sole user of the baseline during a run.

use crossbeam_channel::Receiver;
use log::warn;
use std::io::Write;

use crate::engine::db_ops::Baseline;
use crate::engine::tools::path_to_db_string;
use crate::{HashResult, RunState};

/// Classify one result against the baseline and fold it into `state`.
///
/// Match notices are written to `out` immediately; everything else goes to `state.log`.
/// A mismatch leaves the stored digest untouched.
pub fn reconcile_one<B, W>(
    result: &HashResult,
    baseline: &mut B,
    out: &mut W,
    state: &mut RunState,
) where
    B: Baseline + ?Sized,
    W: Write + ?Sized,
{
    let path = path_to_db_string(&result.path);
    match baseline.get(&path) {
        Ok(None) => match baseline.insert(&path, &result.digest) {
            Ok(()) => {
                state
                    .log
                    .push(format!("Inserted hash for {}: {}", path, result.digest));
                state.saw_new_file = true;
                state.inserted += 1;
            }
            Err(e) => {
                state
                    .log
                    .push(format!("Error inserting hash for {}: {:#}", path, e));
                state.saw_error = true;
                state.errors += 1;
            }
        },
        Ok(Some(stored)) if stored == result.digest => {
            state.success_count += 1;
            if let Err(e) = writeln!(out, "Hash match for {}: computed={}", path, stored) {
                warn!("Cannot write match notice for {}: {}", path, e);
            }
        }
        Ok(Some(stored)) => {
            state.log.push(format!(
                "Hash mismatch for {}: stored={}, computed={}",
                path, stored, result.digest
            ));
            state.saw_error = true;
            state.mismatched += 1;
        }
        Err(e) => {
            state
                .log
                .push(format!("Error querying hash for {}: {:#}", path, e));
            state.saw_error = true;
            state.errors += 1;
        }
    }
}

/// Drain `result_rx` one result at a time until every sender is gone, then append the summary.
///
/// Results for the same path cannot arrive twice in one run, so no lookup/insert race exists
/// as long as this stays the only consumer.
pub fn reconcile<B, W>(result_rx: Receiver<HashResult>, baseline: &mut B, out: &mut W) -> RunState
where
    B: Baseline + ?Sized,
    W: Write + ?Sized,
{
    let mut state = RunState::default();
    while let Ok(result) = result_rx.recv() {
        reconcile_one(&result, baseline, out, &mut state);
    }
    state.log.push(format!(
        "{} files have passed the integrity tests",
        state.success_count
    ));
    state
}

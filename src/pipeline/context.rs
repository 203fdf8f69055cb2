//! Pipeline channels and handles shared between the dispatcher, workers and the reconciler.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::path::PathBuf;
use std::thread::JoinHandle;

use crate::utils::config::WorkerLimits;
use crate::{HashFailure, HashResult};

/// Worker count and queue depth for one run.
#[derive(Clone, Copy, Debug)]
pub struct PoolTuning {
    pub num_workers: usize,
    pub channel_cap: usize,
}

impl PoolTuning {
    /// Queue depth scales with the worker count so the dispatcher stays a little ahead.
    pub fn for_workers(num_workers: usize) -> Self {
        let num_workers = num_workers.max(WorkerLimits::MIN_WORKERS);
        Self {
            num_workers,
            channel_cap: num_workers * WorkerLimits::QUEUE_DEPTH_PER_WORKER,
        }
    }
}

/// Handles returned by [`run_pool`](super::run_pool): drain `result_rx`, then join with
/// [`shutdown_pool_handles`](super::shutdown_pool_handles).
pub struct PoolHandles {
    pub result_rx: Receiver<HashResult>,
    /// Returns the number of tasks dispatched.
    pub dispatch_handle: JoinHandle<usize>,
    /// Each worker returns the files it could not hash.
    pub worker_handles: Vec<JoinHandle<Vec<HashFailure>>>,
}

/// Totals known once every pipeline thread has exited.
#[derive(Debug, Default)]
pub struct PoolSummary {
    pub dispatched: usize,
    pub failures: Vec<HashFailure>,
}

/// Task and result channels. Dispatcher gets `task_tx`; workers get `task_rx` and `result_tx`.
pub struct PoolChannels {
    pub task_tx: Sender<PathBuf>,
    pub task_rx: Receiver<PathBuf>,
    pub result_tx: Sender<HashResult>,
    pub result_rx: Receiver<HashResult>,
}

pub fn create_pool_channels(tuning: &PoolTuning) -> PoolChannels {
    let (task_tx, task_rx) = bounded::<PathBuf>(tuning.channel_cap);
    let (result_tx, result_rx) = bounded::<HashResult>(tuning.channel_cap);
    PoolChannels {
        task_tx,
        task_rx,
        result_tx,
        result_rx,
    }
}

//! Pipeline components: dispatcher, hashing workers, channels, orchestration.

pub mod context;
pub mod dispatch;
pub mod orchestrator;
pub mod workers;

pub use context::{PoolChannels, PoolHandles, PoolSummary, PoolTuning, create_pool_channels};
pub use dispatch::{run_dispatch_loop, should_dispatch, spawn_dispatch_thread};
pub use orchestrator::{
    hash_all, report_skipped_files, run_pool, setup_pool_tuning, shutdown_pool_handles,
};
pub use workers::spawn_hash_workers;

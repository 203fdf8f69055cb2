//! File descriptor limit detection for capping the hashing pool (Unix).

use log::debug;

use crate::utils::config::WorkerLimits;

/// Descriptors a hashing worker may hold at once (the file, plus headroom).
const FDS_PER_WORKER: usize = 2;

/// Descriptors kept aside for stdio, the baseline database and its sidecars.
const RESERVED_FDS: u64 = 16;

/// Fraction of the process FD limit the pool may use.
const FD_LIMIT_FRACTION: f64 = 0.8;

/// Soft limit for open file descriptors, or `None` if unavailable or unlimited.
#[cfg(unix)]
fn max_open_fds() -> Option<u64> {
    use std::mem::MaybeUninit;
    let mut rlim = MaybeUninit::<libc::rlimit>::uninit();
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, rlim.as_mut_ptr()) } != 0 {
        return None;
    }
    let rlim = unsafe { rlim.assume_init() };
    let cur = rlim.rlim_cur;
    // RLIM_INFINITY is typically !0 or u64::MAX; treat as "no practical limit"
    if cur == libc::RLIM_INFINITY || cur > i64::MAX as u64 {
        return None;
    }
    Some(cur as u64)
}

#[cfg(not(unix))]
fn max_open_fds() -> Option<u64> {
    None
}

/// Largest worker count that stays under ~80% of the FD limit. `None` when there is no limit.
fn max_workers_by_fd_limit() -> Option<usize> {
    let limit = max_open_fds()?.saturating_sub(RESERVED_FDS);
    let usable = (limit as f64 * FD_LIMIT_FRACTION) as usize;
    Some((usable / FDS_PER_WORKER).max(WorkerLimits::MIN_WORKERS))
}

/// Apply the FD cap and the lower bound to a requested worker count.
pub fn effective_workers(requested: usize) -> usize {
    let requested = requested.max(WorkerLimits::MIN_WORKERS);
    match max_workers_by_fd_limit() {
        Some(fd_cap) if fd_cap < requested => {
            debug!("Capping workers {} -> {} (FD limit ~80%)", requested, fd_cap);
            fd_cap
        }
        _ => requested,
    }
}

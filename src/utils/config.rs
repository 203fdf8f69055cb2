//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    env_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                env_prefix: pkg.to_uppercase(),
            }
        })
    }

    /// Per-directory config file name (`.hashwarden.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Environment variable name for `suffix`, e.g. `HASHWARDEN_SMTP_PASSWORD`.
    pub fn env_key(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }
}

// ---- Worker threads ----

/// Worker pool sizing.
pub struct WorkerLimits;

impl WorkerLimits {
    /// Hashing workers when nothing else is configured.
    pub const DEFAULT_WORKERS: usize = 8;
    /// Lower bound after all caps are applied.
    pub const MIN_WORKERS: usize = 1;
    /// Task and result channel capacity per worker.
    pub const QUEUE_DEPTH_PER_WORKER: usize = 4;
}

// ---- Hashing ----

/// Hashing buffer sizes.
pub struct HashingConsts;

impl HashingConsts {
    /// Read size for streaming a file into the hasher (bytes). 1 MB.
    pub const HASH_READ_CHUNK_SIZE: usize = 1024 * 1024;
}

// ---- Database ----

/// SQLite sidecar suffixes that live next to the baseline file.
pub const DB_SIDECAR_SUFFIXES: [&str; 3] = ["-wal", "-shm", "-journal"];

// ---- Notification ----

pub struct SmtpDefaults;

impl SmtpDefaults {
    pub const HOST: &'static str = "smtp.gmail.com";
    pub const PORT: u16 = 587;
}

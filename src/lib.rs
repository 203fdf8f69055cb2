//! Hashwarden: one-shot directory integrity audit against a persisted baseline

pub mod audit;
pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use audit::{AuditReport, audit_dir, audit_entries, list_root};

/// Result alias used by public hashwarden API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

//! Baseline persistence: the `file_hashes` table and the lookup/insert contract.

mod connection;

pub use connection::SqliteBaseline;

use anyhow::Result;

/// WAL tuning pragmas (synchronous, autocheckpoint, size limit). Use after PRAGMA journal_mode = WAL.
pub(crate) const WAL_PRAGMAS: &str = r#"
        PRAGMA synchronous = NORMAL;
        PRAGMA wal_autocheckpoint = 10000;
        PRAGMA journal_size_limit = 67108864;
        "#;

/// Schema for the baseline table.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS file_hashes (
    filename TEXT PRIMARY KEY,
    hash TEXT
);
"#;

/// Plain insert: the primary key rejects a second row for the same filename.
pub(crate) const INSERT_HASH_SQL: &str = "INSERT INTO file_hashes (filename, hash) VALUES (?1, ?2)";

pub(crate) const SELECT_HASH_SQL: &str = "SELECT hash FROM file_hashes WHERE filename = ?1";

/// Persisted mapping from file path to last-known-good digest.
///
/// Only the reconciler touches a baseline during a run, so implementations need no locking.
pub trait Baseline {
    /// Stored digest for `filename`; `Ok(None)` when there is no entry.
    fn get(&self, filename: &str) -> Result<Option<String>>;

    /// Record `filename -> hash`. Fails if an entry for `filename` already exists.
    fn insert(&mut self, filename: &str, hash: &str) -> Result<()>;
}

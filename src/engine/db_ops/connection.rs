//! Open, query, insert into, and close the SQLite baseline.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

use super::{Baseline, INSERT_HASH_SQL, SCHEMA, SELECT_HASH_SQL, WAL_PRAGMAS};

/// Enable WAL and apply schema to an open connection (idempotent).
fn apply_wal_and_schema(conn: &Connection) -> Result<()> {
    conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))
        .context("enable WAL")?;
    conn.execute_batch(WAL_PRAGMAS).context("set WAL pragmas")?;
    conn.execute_batch(SCHEMA).context("create schema")?;
    Ok(())
}

/// [`Baseline`] backed by a SQLite file.
pub struct SqliteBaseline {
    conn: Connection,
}

impl SqliteBaseline {
    /// Open or create the baseline at `path` and ensure schema + WAL.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("open baseline database {}", path.display()))?;
        apply_wal_and_schema(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory baseline with the same schema (no WAL pragmas needed).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        conn.execute_batch(SCHEMA).context("create schema")?;
        Ok(Self { conn })
    }

    /// Number of stored entries.
    pub fn len(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM file_hashes", [], |row| row.get(0))
            .context("count baseline entries")?;
        Ok(n.max(0) as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Every stored entry: filename -> hash. Rows with a NULL hash map to an empty string.
    pub fn load_all(&self) -> Result<HashMap<String, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT filename, hash FROM file_hashes")?;
        let rows = stmt.query_map([], |row| {
            let filename: String = row.get(0)?;
            let hash: Option<String> = row.get(1)?;
            Ok((filename, hash.unwrap_or_default()))
        })?;
        let mut map = HashMap::new();
        for row in rows {
            let (filename, hash) = row?;
            map.insert(filename, hash);
        }
        Ok(map)
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("close baseline database")
    }
}

impl Baseline for SqliteBaseline {
    fn get(&self, filename: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare_cached(SELECT_HASH_SQL)
            .context("prepare lookup")?;
        let hash: Option<Option<String>> = stmt
            .query_row([filename], |row| row.get(0))
            .optional()
            .context("query hash")?;
        // A row with a NULL hash is treated as an empty stored digest so it reports as a mismatch.
        Ok(hash.map(|h| h.unwrap_or_default()))
    }

    fn insert(&mut self, filename: &str, hash: &str) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare_cached(INSERT_HASH_SQL)
            .context("prepare insert")?;
        stmt.execute([filename, hash]).context("insert hash")?;
        Ok(())
    }
}

//! SQLite bootstrap for the `storage_items` key-value table.
//!
//! # Invariants
//! - A returned connection holds the current `storage_items` schema.
//! - The schema version lives in `PRAGMA user_version`; files written by a
//!   newer build are refused rather than downgraded.

use crate::repo::service_repo::{RepoError, RepoResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

const STORAGE_ITEMS_V1: &str = "CREATE TABLE IF NOT EXISTS storage_items (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Opens (creating if needed) a SQLite storage file.
pub fn open_db(path: impl AsRef<Path>) -> RepoResult<Connection> {
    open_logged("file", || Connection::open(path))
}

/// Opens a private in-memory storage database.
pub fn open_db_in_memory() -> RepoResult<Connection> {
    open_logged("memory", Connection::open_in_memory)
}

/// Reads the schema version recorded in the connection.
pub fn schema_version(conn: &Connection) -> RepoResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Lists every storage slot key present, in key order.
pub fn stored_keys(conn: &Connection) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT key FROM storage_items ORDER BY key;")?;
    let keys = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(keys)
}

fn open_logged(
    mode: &str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> RepoResult<Connection> {
    let started_at = Instant::now();
    let result = open()
        .map_err(RepoError::from)
        .and_then(|mut conn| ensure_schema(&mut conn).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={} schema_version={} duration_ms={}",
            mode,
            SCHEMA_VERSION,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={} duration_ms={} error={}",
            mode,
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn ensure_schema(conn: &mut Connection) -> RepoResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(RepoError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(STORAGE_ITEMS_V1)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    Ok(())
}

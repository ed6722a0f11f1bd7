//! SQLite-backed key-value repository.
//!
//! # Responsibility
//! - Persist the `services` slot as one row of `storage_items`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Saves upsert the row; at most one row exists per key.

use crate::model::service::ServiceRecord;
use crate::repo::service_repo::{
    decode_services, encode_services, RepoResult, ServiceRepository, STORAGE_KEY,
};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository over a migrated SQLite connection.
pub struct SqliteServiceRepository<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteServiceRepository<'conn> {
    /// Uses the standard `services` key.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, STORAGE_KEY)
    }

    /// Uses a caller-chosen key, e.g. for isolated test slots.
    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }
}

impl ServiceRepository for SqliteServiceRepository<'_> {
    fn load(&self) -> RepoResult<Option<Vec<ServiceRecord>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM storage_items WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => decode_services(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, services: &[ServiceRecord]) -> RepoResult<()> {
        let encoded = encode_services(services)?;
        self.conn.execute(
            "INSERT INTO storage_items (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.key.as_str(), encoded],
        )?;
        Ok(())
    }
}

//! Durable storage contracts and backends for the service collection.
//!
//! # Responsibility
//! - Define the load/save contract the store is constructed with.
//! - Keep the storage medium (memory, JSON file, SQLite) swappable.
//!
//! # Invariants
//! - Every backend stores the full sequence as one JSON array under the
//!   `services` key and overwrites it wholesale on save.
//! - Failures are returned to the caller, never swallowed.

pub mod json_file_repo;
pub mod memory_repo;
pub mod service_repo;
pub mod sqlite_repo;

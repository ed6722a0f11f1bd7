//! Core domain logic for CareSvc, a healthcare service catalog.
//! This crate owns validation, the service store and its durable storage.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::service::{
    default_services, parse_price, ServiceCandidate, ServiceId, ServiceRecord,
};
pub use model::validation::{validate, FieldErrors, ServiceField, ValidService};
pub use repo::json_file_repo::JsonFileServiceRepository;
pub use repo::memory_repo::InMemoryServiceRepository;
pub use repo::service_repo::{RepoError, RepoResult, ServiceRepository, STORAGE_KEY};
pub use repo::sqlite_repo::SqliteServiceRepository;
pub use service::ids::{IdGenerator, MonotonicIdGenerator};
pub use service::service_form::{
    DialogState, FormError, FormResult, Notice, ServiceForm, SubmitOutcome,
};
pub use service::service_store::{
    RemoveOutcome, ServiceStore, StoreError, StoreOrigin, StoreResult, UpdateOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

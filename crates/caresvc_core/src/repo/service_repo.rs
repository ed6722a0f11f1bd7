//! Service repository contract and shared JSON codec.
//!
//! # Responsibility
//! - Define `ServiceRepository`, the seam between the store and storage.
//! - Encode/decode the persisted `services` JSON array.
//!
//! # Invariants
//! - `load` distinguishes an absent slot (`Ok(None)`) from unparseable data
//!   (`Err(RepoError::InvalidData)`).
//! - Decoding preserves sequence order and field values.

use crate::model::service::ServiceRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the collection is persisted.
pub const STORAGE_KEY: &str = "services";

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for service persistence.
#[derive(Debug)]
pub enum RepoError {
    Sqlite(rusqlite::Error),
    /// SQLite file was written by a newer schema than this build supports.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    Io(std::io::Error),
    /// Persisted value exists but does not decode as a service array.
    InvalidData(String),
    Encode(serde_json::Error),
    /// Backend refused the write (used by test doubles and read-only media).
    WriteRejected(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "storage schema version {found} is newer than supported {supported}"
            ),
            Self::Io(err) => write!(f, "storage io error: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted services data: {message}"),
            Self::Encode(err) => write!(f, "failed to encode services: {err}"),
            Self::WriteRejected(message) => write!(f, "storage write rejected: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_)
            | Self::WriteRejected(_)
            | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Repository interface for the persisted service sequence.
pub trait ServiceRepository {
    /// Reads the persisted sequence; `None` when nothing was stored yet.
    fn load(&self) -> RepoResult<Option<Vec<ServiceRecord>>>;
    /// Overwrites the persisted sequence with `services`.
    fn save(&self, services: &[ServiceRecord]) -> RepoResult<()>;
}

impl<R: ServiceRepository + ?Sized> ServiceRepository for &R {
    fn load(&self) -> RepoResult<Option<Vec<ServiceRecord>>> {
        (**self).load()
    }

    fn save(&self, services: &[ServiceRecord]) -> RepoResult<()> {
        (**self).save(services)
    }
}

impl<R: ServiceRepository + ?Sized> ServiceRepository for Box<R> {
    fn load(&self) -> RepoResult<Option<Vec<ServiceRecord>>> {
        (**self).load()
    }

    fn save(&self, services: &[ServiceRecord]) -> RepoResult<()> {
        (**self).save(services)
    }
}

/// Serializes the full sequence into the persisted JSON form.
pub fn encode_services(services: &[ServiceRecord]) -> RepoResult<String> {
    serde_json::to_string(services).map_err(RepoError::Encode)
}

/// Parses the persisted JSON form back into an ordered sequence.
pub fn decode_services(raw: &str) -> RepoResult<Vec<ServiceRecord>> {
    serde_json::from_str(raw).map_err(|err| RepoError::InvalidData(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{decode_services, encode_services, RepoError};
    use crate::model::service::{default_services, ServiceRecord};

    #[test]
    fn decode_accepts_integer_prices_from_browser_storage() {
        let raw = r#"[{"id":1700000000000,"name":"Vaccination","description":"Flu shot","price":20}]"#;
        let services = decode_services(raw).unwrap();
        assert_eq!(
            services,
            vec![ServiceRecord::new(1_700_000_000_000, "Vaccination", "Flu shot", 20.0)]
        );
    }

    #[test]
    fn decode_rejects_non_array_payload() {
        let err = decode_services(r#"{"services":[]}"#).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn encoded_defaults_use_wire_field_names() {
        let raw = encode_services(&default_services()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["name"], "General Checkup");
        assert_eq!(value[2]["description"], "X-ray imaging for diagnostics");
        assert_eq!(value[1]["price"], 30.0);
    }
}

//! JSON file service repository.
//!
//! # Invariants
//! - A missing file reads as an absent slot.
//! - Saves write a sibling temp file and rename it over the target so a
//!   crash never leaves a truncated array behind.

use crate::model::service::ServiceRecord;
use crate::repo::service_repo::{decode_services, encode_services, RepoResult, ServiceRepository};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default file name for the persisted `services` slot.
pub const SERVICES_FILE_NAME: &str = "services.json";

/// Repository storing the sequence as one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileServiceRepository {
    path: PathBuf,
}

impl JsonFileServiceRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `<dir>/services.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SERVICES_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ServiceRepository for JsonFileServiceRepository {
    fn load(&self) -> RepoResult<Option<Vec<ServiceRecord>>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => decode_services(&raw).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, services: &[ServiceRecord]) -> RepoResult<()> {
        let encoded = encode_services(services)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, encoded)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

//! In-memory service repository.
//!
//! Holds the raw persisted JSON text so that tests exercise the same codec as
//! durable backends.

use crate::model::service::ServiceRecord;
use crate::repo::service_repo::{
    decode_services, encode_services, RepoError, RepoResult, ServiceRepository,
};
use std::cell::{Cell, RefCell};

/// Process-local repository with optional write-failure injection.
#[derive(Debug, Default)]
pub struct InMemoryServiceRepository {
    raw: RefCell<Option<String>>,
    reject_writes: Cell<bool>,
    save_count: Cell<usize>,
}

impl InMemoryServiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a pre-existing persisted value, parseable or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
            ..Self::default()
        }
    }

    /// Returns the currently persisted JSON text.
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }

    /// Makes subsequent `save` calls fail with `RepoError::WriteRejected`.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    /// Number of successful saves since construction.
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl ServiceRepository for InMemoryServiceRepository {
    fn load(&self) -> RepoResult<Option<Vec<ServiceRecord>>> {
        match self.raw.borrow().as_deref() {
            Some(raw) => decode_services(raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, services: &[ServiceRecord]) -> RepoResult<()> {
        if self.reject_writes.get() {
            return Err(RepoError::WriteRejected(
                "in-memory repository is rejecting writes".to_string(),
            ));
        }
        let encoded = encode_services(services)?;
        *self.raw.borrow_mut() = Some(encoded);
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}

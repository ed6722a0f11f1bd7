//! Service store use-case service.
//!
//! # Responsibility
//! - Own the ordered in-memory service sequence.
//! - Persist the full sequence through the injected repository after every
//!   mutation.
//! - Seed from storage, or from the default catalog when storage is empty or
//!   unreadable.
//!
//! # Invariants
//! - In-memory state only changes after the repository accepted the write, so
//!   memory and storage agree after every call.
//! - Ids are unique within the sequence; new ids exceed every loaded id.
//! - Update and remove touch at most one record and never reorder others.

use crate::model::service::{default_services, ServiceId, ServiceRecord};
use crate::model::validation::ValidService;
use crate::repo::service_repo::{RepoError, ServiceRepository};
use crate::service::ids::{IdGenerator, MonotonicIdGenerator};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure.
#[derive(Debug)]
pub enum StoreError {
    /// Repository failed to read or write durable storage.
    Storage(RepoError),
    /// No id above the greatest stored id is left to issue.
    IdsExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::IdsExhausted => write!(f, "no unused service id is left to assign"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::IdsExhausted => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Where the initial sequence came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOrigin {
    /// Decoded from durable storage.
    Stored,
    /// Storage had no value.
    DefaultsEmpty,
    /// Storage held a value that did not decode; it has been overwritten.
    DefaultsRecovered(String),
}

/// Result of `ServiceStore::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The record with this id was replaced in place.
    Updated(ServiceRecord),
    /// No record had this id; the sequence is unchanged.
    NotFound(ServiceId),
}

/// Result of `ServiceStore::remove`.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    Removed(ServiceRecord),
    NotFound(ServiceId),
}

/// In-memory service sequence mirrored to a repository.
pub struct ServiceStore<R: ServiceRepository, G: IdGenerator = MonotonicIdGenerator> {
    repo: R,
    ids: G,
    services: Vec<ServiceRecord>,
    origin: StoreOrigin,
}

impl<R: ServiceRepository> ServiceStore<R> {
    /// Opens a store with wall-clock based monotonic ids.
    pub fn open_default(repo: R) -> StoreResult<Self> {
        Self::open(repo, MonotonicIdGenerator::new())
    }
}

impl<R: ServiceRepository, G: IdGenerator> ServiceStore<R, G> {
    /// Loads the sequence from `repo` and writes it back immediately.
    ///
    /// # Errors
    /// - Returns `StoreError::Storage` when storage cannot be read for reasons
    ///   other than unparseable data, or when the initial write fails.
    pub fn open(repo: R, mut ids: G) -> StoreResult<Self> {
        let (services, origin) = match repo.load() {
            Ok(Some(services)) => (services, StoreOrigin::Stored),
            Ok(None) => (default_services(), StoreOrigin::DefaultsEmpty),
            Err(RepoError::InvalidData(message)) => {
                warn!(
                    "event=store_open module=store status=recovered reason=invalid_data error={}",
                    message
                );
                (default_services(), StoreOrigin::DefaultsRecovered(message))
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error error_code=load_failed error={}",
                    err
                );
                return Err(err.into());
            }
        };

        if let Some(max_id) = services.iter().map(|service| service.id).max() {
            ids.reserve_above(max_id);
        }

        repo.save(&services)?;
        info!(
            "event=store_open module=store status=ok origin={} count={}",
            origin_label(&origin),
            services.len()
        );

        Ok(Self {
            repo,
            ids,
            services,
            origin,
        })
    }

    /// Current ordered sequence.
    pub fn services(&self) -> &[ServiceRecord] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn get(&self, id: ServiceId) -> Option<&ServiceRecord> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn origin(&self) -> &StoreOrigin {
        &self.origin
    }

    /// Borrow of the backing repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Appends an accepted candidate under a fresh id.
    ///
    /// Any id carried by the candidate is ignored.
    ///
    /// # Errors
    /// - `StoreError::IdsExhausted` when the generator has no fresh id left;
    ///   the sequence is unchanged.
    pub fn add(&mut self, service: ValidService) -> StoreResult<ServiceRecord> {
        let Some(id) = self.ids.next_id() else {
            error!("event=service_add module=store status=error error_code=ids_exhausted");
            return Err(StoreError::IdsExhausted);
        };
        let record = service.into_record(id);

        let mut next = self.services.clone();
        next.push(record.clone());
        self.commit(next, "service_add", id)?;
        Ok(record)
    }

    /// Replaces the first record whose id matches `record.id`.
    pub fn update(&mut self, record: ServiceRecord) -> StoreResult<UpdateOutcome> {
        let Some(index) = self.position(record.id) else {
            info!(
                "event=service_update module=store status=not_found id={}",
                record.id
            );
            return Ok(UpdateOutcome::NotFound(record.id));
        };

        let mut next = self.services.clone();
        next[index] = record.clone();
        self.commit(next, "service_update", record.id)?;
        Ok(UpdateOutcome::Updated(record))
    }

    /// Removes the record matching `id`; persists whether or not it existed.
    pub fn remove(&mut self, id: ServiceId) -> StoreResult<RemoveOutcome> {
        let mut next = self.services.clone();
        let removed = self.position(id).map(|index| next.remove(index));
        self.commit(next, "service_remove", id)?;

        Ok(match removed {
            Some(record) => RemoveOutcome::Removed(record),
            None => RemoveOutcome::NotFound(id),
        })
    }

    /// Replaces the whole sequence with the default catalog.
    pub fn reset_to_defaults(&mut self) -> StoreResult<()> {
        let defaults = default_services();
        if let Some(max_id) = defaults.iter().map(|service| service.id).max() {
            self.ids.reserve_above(max_id);
        }
        self.commit(defaults, "store_reset", 0)
    }

    fn position(&self, id: ServiceId) -> Option<usize> {
        self.services.iter().position(|service| service.id == id)
    }

    fn commit(&mut self, next: Vec<ServiceRecord>, event: &str, id: ServiceId) -> StoreResult<()> {
        if let Err(err) = self.repo.save(&next) {
            error!(
                "event={} module=store status=error error_code=save_failed id={} error={}",
                event, id, err
            );
            return Err(err.into());
        }

        info!(
            "event={} module=store status=ok id={} count={}",
            event,
            id,
            next.len()
        );
        self.services = next;
        Ok(())
    }
}

fn origin_label(origin: &StoreOrigin) -> &'static str {
    match origin {
        StoreOrigin::Stored => "stored",
        StoreOrigin::DefaultsEmpty => "defaults",
        StoreOrigin::DefaultsRecovered(_) => "defaults_recovered",
    }
}

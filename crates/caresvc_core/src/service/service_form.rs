//! Add/edit dialog flow over the service store.
//!
//! # Responsibility
//! - Track which dialog is open and which record it edits.
//! - Route validated submissions to `add` or `update`.
//! - Produce the user-facing notice for each action.
//!
//! # Invariants
//! - An edit target exists only while the dialog is `Editing`.
//! - A rejected submission leaves both the store and the dialog unchanged.

use crate::model::service::{ServiceCandidate, ServiceId, ServiceRecord};
use crate::model::validation::{validate, FieldErrors};
use crate::repo::service_repo::ServiceRepository;
use crate::service::ids::{IdGenerator, MonotonicIdGenerator};
use crate::service::service_store::{
    RemoveOutcome, ServiceStore, StoreError, UpdateOutcome,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const SAVED_MESSAGE: &str = "Service saved successfully!";
pub const REJECTED_MESSAGE: &str = "Please fill in all required fields correctly.";
pub const DELETED_MESSAGE: &str = "Service deleted successfully!";

pub type FormResult<T> = Result<T, FormError>;

/// Dialog visibility and edit target.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogState {
    #[default]
    Closed,
    Creating,
    Editing(ServiceRecord),
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Dialog heading, `None` while closed.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Self::Closed => None,
            Self::Creating => Some("Add New Service"),
            Self::Editing(_) => Some("Edit Service"),
        }
    }

    /// Submit button label, `None` while closed.
    pub fn submit_label(&self) -> Option<&'static str> {
        match self {
            Self::Closed => None,
            Self::Creating => Some("Add Service"),
            Self::Editing(_) => Some("Update Service"),
        }
    }
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
    Info(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) | Self::Info(message) => message,
        }
    }
}

/// Result of submitting the open dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Candidate accepted and persisted; the dialog is closed.
    Saved { record: ServiceRecord, notice: Notice },
    /// Candidate failed validation; the dialog stays open.
    Rejected { errors: FieldErrors, notice: Notice },
    /// The edit target no longer exists in the store; the dialog is closed.
    Stale { id: ServiceId, notice: Notice },
}

#[derive(Debug)]
pub enum FormError {
    /// Submit was called with no dialog open.
    DialogClosed,
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DialogClosed => write!(f, "no service dialog is open"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DialogClosed => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Dialog controller owning the store it mutates.
pub struct ServiceForm<R: ServiceRepository, G: IdGenerator = MonotonicIdGenerator> {
    store: ServiceStore<R, G>,
    dialog: DialogState,
}

impl<R: ServiceRepository, G: IdGenerator> ServiceForm<R, G> {
    pub fn new(store: ServiceStore<R, G>) -> Self {
        Self {
            store,
            dialog: DialogState::Closed,
        }
    }

    pub fn store(&self) -> &ServiceStore<R, G> {
        &self.store
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    pub fn into_store(self) -> ServiceStore<R, G> {
        self.store
    }

    /// Opens an empty dialog for a new record.
    pub fn open_create(&mut self) {
        self.dialog = DialogState::Creating;
    }

    /// Opens the dialog prefilled with record `id`.
    ///
    /// Returns `false` and leaves the dialog unchanged when `id` is unknown.
    pub fn open_edit(&mut self, id: ServiceId) -> bool {
        match self.store.get(id) {
            Some(record) => {
                self.dialog = DialogState::Editing(record.clone());
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.dialog = DialogState::Closed;
    }

    /// Values the open dialog starts from.
    pub fn initial_candidate(&self) -> ServiceCandidate {
        match &self.dialog {
            DialogState::Editing(record) => record.to_candidate(),
            DialogState::Closed | DialogState::Creating => ServiceCandidate::default(),
        }
    }

    /// Validates and applies `candidate` according to the open dialog.
    ///
    /// # Errors
    /// - `FormError::DialogClosed` when no dialog is open.
    /// - `FormError::Store` when persistence fails; the dialog stays open.
    pub fn submit(&mut self, candidate: &ServiceCandidate) -> FormResult<SubmitOutcome> {
        if !self.dialog.is_open() {
            return Err(FormError::DialogClosed);
        }

        let valid = match validate(candidate) {
            Ok(valid) => valid,
            Err(errors) => {
                return Ok(SubmitOutcome::Rejected {
                    errors,
                    notice: Notice::Error(REJECTED_MESSAGE.to_string()),
                });
            }
        };

        let outcome = match &self.dialog {
            DialogState::Editing(target) => {
                let id = target.id;
                match self.store.update(valid.into_record(id))? {
                    UpdateOutcome::Updated(record) => SubmitOutcome::Saved {
                        record,
                        notice: Notice::Success(SAVED_MESSAGE.to_string()),
                    },
                    UpdateOutcome::NotFound(id) => SubmitOutcome::Stale {
                        id,
                        notice: Notice::Error(format!("Service {id} no longer exists.")),
                    },
                }
            }
            DialogState::Creating | DialogState::Closed => SubmitOutcome::Saved {
                record: self.store.add(valid)?,
                notice: Notice::Success(SAVED_MESSAGE.to_string()),
            },
        };

        self.dialog = DialogState::Closed;
        Ok(outcome)
    }

    /// Deletes record `id`; the notice is informational either way.
    pub fn delete(&mut self, id: ServiceId) -> FormResult<(RemoveOutcome, Notice)> {
        let outcome = self.store.remove(id)?;
        Ok((outcome, Notice::Info(DELETED_MESSAGE.to_string())))
    }
}

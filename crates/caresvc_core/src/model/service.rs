//! Service record domain model.
//!
//! # Responsibility
//! - Define `ServiceRecord`, the unit persisted under the `services` key.
//! - Define `ServiceCandidate`, the raw form shape submitted for add/update.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused within one collection.
//! - Candidate values are carried unchanged into accepted records.

use serde::{Deserialize, Serialize};

/// Stable identifier for one service record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ServiceId = i64;

/// One healthcare offering as stored and rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: ServiceId,
    pub name: String,
    pub description: String,
    /// Currency-agnostic amount. Must be > 0 for records admitted by the validator.
    pub price: f64,
}

impl ServiceRecord {
    pub fn new(
        id: ServiceId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Returns the candidate shape used to prefill an edit form.
    pub fn to_candidate(&self) -> ServiceCandidate {
        ServiceCandidate {
            id: Some(self.id),
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            price: self.price,
        }
    }
}

/// User-supplied, not-yet-validated record shape.
///
/// `price` may be `NaN` when the raw form input was not numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCandidate {
    /// Present only when the candidate edits an existing record.
    pub id: Option<ServiceId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: f64,
}

impl Default for ServiceCandidate {
    /// Blank form: empty text fields and a zero price.
    fn default() -> Self {
        Self {
            id: None,
            name: Some(String::new()),
            description: Some(String::new()),
            price: 0.0,
        }
    }
}

impl ServiceCandidate {
    /// Creates a candidate for a new record.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            description: Some(description.into()),
            price,
        }
    }

    /// Builds a candidate from raw form text.
    ///
    /// Price text that does not parse as a number becomes `NaN`, which the
    /// validator rejects with the price message.
    pub fn from_form_input(name: &str, description: &str, price_text: &str) -> Self {
        Self::new(name, description, parse_price(price_text))
    }
}

/// Parses user price input leniently; blank or malformed input yields `NaN`.
pub fn parse_price(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Returns the fixed catalog used when durable storage is empty or unreadable.
pub fn default_services() -> Vec<ServiceRecord> {
    vec![
        ServiceRecord::new(1, "General Checkup", "Full body checkup", 50.0),
        ServiceRecord::new(2, "Blood Test", "Complete blood count test", 30.0),
        ServiceRecord::new(3, "X-Ray", "X-ray imaging for diagnostics", 100.0),
    ]
}

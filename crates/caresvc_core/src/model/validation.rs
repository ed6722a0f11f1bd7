//! Service form validation.
//!
//! # Responsibility
//! - Check candidate fields independently and report every violation.
//! - Produce an accepted value that the store can admit without re-checking.
//!
//! # Invariants
//! - Validation has no side effects.
//! - Accepted values are not normalized; text is kept as entered.
//! - `FieldErrors` always carries all three fields; passing fields map to `""`.

use crate::model::service::{ServiceCandidate, ServiceId, ServiceRecord};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_REQUIRED: &str = "Name is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const PRICE_NOT_POSITIVE: &str = "Price must be greater than 0";

/// Form field addressed by a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceField {
    Name,
    Description,
    Price,
}

impl ServiceField {
    pub const ALL: [ServiceField; 3] = [Self::Name, Self::Description, Self::Price];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
        }
    }
}

/// Per-field validation messages. An empty string means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl FieldErrors {
    /// Returns the message for one field (`""` when the field passed).
    pub fn get(&self, field: ServiceField) -> &str {
        match field {
            ServiceField::Name => &self.name,
            ServiceField::Description => &self.description,
            ServiceField::Price => &self.price,
        }
    }

    /// Returns `true` when no field carries a message.
    pub fn is_empty(&self) -> bool {
        ServiceField::ALL
            .iter()
            .all(|field| self.get(*field).is_empty())
    }

    /// Iterates over violated fields only, in form order.
    pub fn violations(&self) -> impl Iterator<Item = (ServiceField, &str)> {
        ServiceField::ALL
            .into_iter()
            .map(|field| (field, self.get(field)))
            .filter(|(_, message)| !message.is_empty())
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.violations() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {message}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

/// Candidate that passed every field rule.
///
/// Only `validate` constructs this type, so holding one proves the rules held
/// at submission time.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidService {
    id: Option<ServiceId>,
    name: String,
    description: String,
    price: f64,
}

impl ValidService {
    pub fn id(&self) -> Option<ServiceId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Binds accepted values to a concrete id.
    pub fn into_record(self, id: ServiceId) -> ServiceRecord {
        ServiceRecord {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

/// Validates a candidate against all field rules.
///
/// # Errors
/// Returns `FieldErrors` listing every violated field when any rule fails.
pub fn validate(candidate: &ServiceCandidate) -> Result<ValidService, FieldErrors> {
    let mut errors = FieldErrors::default();

    if is_blank(candidate.name.as_deref()) {
        errors.name = NAME_REQUIRED.to_string();
    }
    if is_blank(candidate.description.as_deref()) {
        errors.description = DESCRIPTION_REQUIRED.to_string();
    }
    // NaN fails `> 0.0`, so non-numeric input lands here too.
    if !(candidate.price.is_finite() && candidate.price > 0.0) {
        errors.price = PRICE_NOT_POSITIVE.to_string();
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidService {
        id: candidate.id,
        name: candidate.name.clone().unwrap_or_default(),
        description: candidate.description.clone().unwrap_or_default(),
        price: candidate.price,
    })
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}

//! Domain model for healthcare service offerings.
//!
//! # Responsibility
//! - Define the canonical service record and its unvalidated candidate shape.
//! - Own the fixed default catalog used to seed empty storage.
//!
//! # Invariants
//! - Every stored record is identified by a unique positive `ServiceId`.
//! - Field validity is enforced at the validation boundary, not on read.

pub mod service;
pub mod validation;

//! Core use-case services.
//!
//! # Responsibility
//! - Hold the in-memory service sequence and mirror it to storage.
//! - Drive the add/edit dialog flow on top of the store.
//! - Keep callers decoupled from storage details.

pub mod ids;
pub mod service_form;
pub mod service_store;

//! Obligo Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Obligo.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod investors;
pub mod payments;
pub mod projects;
pub mod reminders;
pub mod reports;
pub mod schedule;
pub mod subscriptions;
pub mod tranches;

// Re-export common types from the schedule module
pub use schedule::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

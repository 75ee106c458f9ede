//! SQLite storage implementation for Obligo.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `obligo-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! `core` is database-agnostic and works with traits. Reads go through the r2d2
//! pool; every mutation is funnelled through a single writer actor, one job per
//! transaction.

pub mod db;
pub mod errors;
pub mod schema;

mod utils;

// Repository implementations
pub mod investors;
pub mod payments;
pub mod projects;
pub mod schedule;
pub mod subscriptions;
pub mod tranches;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from obligo-core for convenience
pub use obligo_core::errors::{DatabaseError, Error, Result};

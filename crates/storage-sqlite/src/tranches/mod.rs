//! SQLite storage implementation for tranches.

mod model;
mod repository;

pub use model::{NewTrancheDB, TrancheDB};
pub use repository::TrancheRepository;

//! Tranches module - domain models, services, and traits.

mod tranches_model;
mod tranches_service;
mod tranches_traits;

pub use tranches_model::{CouponFrequency, NewTranche, Tranche};
pub use tranches_service::TrancheService;
pub use tranches_traits::{TrancheRepositoryTrait, TrancheServiceTrait};

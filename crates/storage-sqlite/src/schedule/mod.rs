//! SQLite storage implementation for the coupon schedule.

mod model;
mod repository;

pub use model::{InstallmentDB, NewInstallmentDB, ScheduleRowDB};
pub use repository::ScheduleRepository;

//! Reports module - CSV export of schedule views.

mod reports_service;

pub use reports_service::schedule_csv;

//! SQLite storage implementation for investors.

mod model;
mod repository;

pub use model::{InvestorDB, NewInvestorDB};
pub use repository::InvestorRepository;

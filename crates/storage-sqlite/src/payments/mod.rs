//! SQLite storage implementation for payments and proof documents.

mod model;
mod repository;

pub use model::{NewPaymentDB, NewProofDocumentDB, PaymentDB, ProofDocumentDB};
pub use repository::PaymentRepository;

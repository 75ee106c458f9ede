//! Payments module - recording, unmarking, and proof documents.

mod payments_errors;
mod payments_model;
mod payments_service;
mod payments_traits;

pub use payments_errors::PaymentError;
pub use payments_model::{
    BulkPaymentError, BulkPaymentOutcome, NewPayment, NewProofDocument, Payment, ProofDocument,
};
pub use payments_service::PaymentService;
pub use payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait, ProofStore};

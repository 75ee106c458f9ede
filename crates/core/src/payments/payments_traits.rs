use chrono::NaiveDate;

use crate::errors::Result;
use crate::payments::payments_model::{
    BulkPaymentOutcome, NewPayment, NewProofDocument, Payment, ProofDocument,
};
use async_trait::async_trait;

/// Trait for payment repository operations.
///
/// Every async method is one writer-actor job, i.e. one database
/// transaction. `record_payment` inserts the payment row and flips the
/// installment to paid together; `unmark_payment` deletes the payment row
/// and its proof rows and resets the installment together, returning the
/// removed proof rows so the caller can clean up the stored blobs after
/// commit.
#[async_trait]
pub trait PaymentRepositoryTrait: Send + Sync {
    fn get_payment_for_installment(&self, installment_id: &str) -> Result<Payment>;
    fn list_proofs(&self, payment_id: &str) -> Result<Vec<ProofDocument>>;
    async fn record_payment(&self, new_payment: NewPayment) -> Result<Payment>;
    async fn unmark_payment(&self, installment_id: String) -> Result<Vec<ProofDocument>>;
    async fn insert_proof(&self, new_proof: NewProofDocument) -> Result<ProofDocument>;
    async fn delete_proof(&self, proof_id: String) -> Result<ProofDocument>;
}

/// Object-storage boundary for proof binaries. Opaque collaborator with a
/// simple put/remove contract; the server wires a filesystem implementation.
#[async_trait]
pub trait ProofStore: Send + Sync {
    async fn put(&self, storage_key: &str, content: Vec<u8>) -> Result<()>;
    async fn remove(&self, storage_key: &str) -> Result<()>;
}

/// Trait for payment service operations
#[async_trait]
pub trait PaymentServiceTrait: Send + Sync {
    fn get_payment_for_installment(&self, installment_id: &str) -> Result<Payment>;
    fn list_proofs(&self, payment_id: &str) -> Result<Vec<ProofDocument>>;
    async fn record_payment(&self, new_payment: NewPayment) -> Result<Payment>;
    async fn record_payments_bulk(&self, requests: Vec<NewPayment>)
        -> Result<BulkPaymentOutcome>;
    async fn unmark_payment(&self, installment_id: String) -> Result<()>;
    async fn unmark_date_group(
        &self,
        due_date: NaiveDate,
        tranche_id: Option<String>,
    ) -> Result<BulkPaymentOutcome>;
    async fn attach_proof(
        &self,
        payment_id: String,
        file_name: String,
        content: Vec<u8>,
    ) -> Result<ProofDocument>;
    async fn remove_proof(&self, proof_id: String) -> Result<()>;
}

use chrono::Utc;
use obligo_core::payments::{
    NewPayment, NewProofDocument, Payment, PaymentError, PaymentRepositoryTrait, ProofDocument,
};
use obligo_core::schedule::InstallmentStatus;
use obligo_core::{Error, Result};

use super::model::{NewPaymentDB, NewProofDocumentDB, PaymentDB, ProofDocumentDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{installments, payments, proof_documents};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct PaymentRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PaymentRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        PaymentRepository { pool, writer }
    }

    pub fn get_payment_for_installment_impl(&self, installment_id: &str) -> Result<Payment> {
        let mut conn = get_connection(&self.pool)?;
        let payment_db = payments::table
            .filter(payments::installment_id.eq(installment_id))
            .first::<PaymentDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| PaymentError::NoPaymentRecorded(installment_id.to_string()))?;
        Ok(Payment::from(payment_db))
    }

    pub fn list_proofs_impl(&self, payment_id: &str) -> Result<Vec<ProofDocument>> {
        let mut conn = get_connection(&self.pool)?;
        let proofs_db = proof_documents::table
            .filter(proof_documents::payment_id.eq(payment_id))
            .order(proof_documents::uploaded_at.asc())
            .load::<ProofDocumentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(proofs_db.into_iter().map(ProofDocument::from).collect())
    }
}

#[async_trait]
impl PaymentRepositoryTrait for PaymentRepository {
    fn get_payment_for_installment(&self, installment_id: &str) -> Result<Payment> {
        self.get_payment_for_installment_impl(installment_id)
    }

    fn list_proofs(&self, payment_id: &str) -> Result<Vec<ProofDocument>> {
        self.list_proofs_impl(payment_id)
    }

    /// Inserts the payment row and flips the installment to paid in one
    /// transaction. Rejects installments already marked paid.
    async fn record_payment(&self, new_payment: NewPayment) -> Result<Payment> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Payment> {
                let installment_id_owned = new_payment.installment_id.clone();
                let current_status: String = installments::table
                    .find(&installment_id_owned)
                    .select(installments::status)
                    .first(conn)
                    .map_err(StorageError::from)?;
                if InstallmentStatus::parse(&current_status) == InstallmentStatus::Paid {
                    return Err(Error::Payment(PaymentError::AlreadyPaid(
                        installment_id_owned,
                    )));
                }

                let mut new_payment_db: NewPaymentDB = new_payment.into();
                new_payment_db
                    .id
                    .get_or_insert_with(|| Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(payments::table)
                    .values(&new_payment_db)
                    .returning(PaymentDB::as_returning())
                    .get_result::<PaymentDB>(conn)
                    .map_err(StorageError::from)?;

                diesel::update(installments::table.find(&installment_id_owned))
                    .set((
                        installments::status.eq(InstallmentStatus::Paid.as_str()),
                        installments::paid_date.eq(Some(result_db.paid_date)),
                        installments::paid_amount.eq(Some(result_db.amount.clone())),
                        installments::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(Payment::from(result_db))
            })
            .await
    }

    /// Deletes the payment row and its proof rows and resets the
    /// installment to pending, all in one transaction. Returns the removed
    /// proof rows so the caller can delete the stored blobs after commit.
    async fn unmark_payment(&self, installment_id: String) -> Result<Vec<ProofDocument>> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Vec<ProofDocument>> {
                    let payment_db = payments::table
                        .filter(payments::installment_id.eq(&installment_id))
                        .first::<PaymentDB>(conn)
                        .optional()
                        .map_err(StorageError::from)?
                        .ok_or_else(|| PaymentError::NoPaymentRecorded(installment_id.clone()))?;

                    let proofs_db = proof_documents::table
                        .filter(proof_documents::payment_id.eq(&payment_db.id))
                        .load::<ProofDocumentDB>(conn)
                        .map_err(StorageError::from)?;

                    diesel::delete(
                        proof_documents::table
                            .filter(proof_documents::payment_id.eq(&payment_db.id)),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;
                    diesel::delete(payments::table.find(&payment_db.id))
                        .execute(conn)
                        .map_err(StorageError::from)?;

                    diesel::update(installments::table.find(&installment_id))
                        .set((
                            installments::status.eq(InstallmentStatus::Pending.as_str()),
                            installments::paid_date.eq(None::<chrono::NaiveDate>),
                            installments::paid_amount.eq(None::<String>),
                            installments::updated_at.eq(Utc::now().naive_utc()),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;

                    Ok(proofs_db.into_iter().map(ProofDocument::from).collect())
                },
            )
            .await
    }

    async fn insert_proof(&self, new_proof: NewProofDocument) -> Result<ProofDocument> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<ProofDocument> {
                    let mut new_proof_db: NewProofDocumentDB = new_proof.into();
                    new_proof_db
                        .id
                        .get_or_insert_with(|| Uuid::new_v4().to_string());

                    let result_db = diesel::insert_into(proof_documents::table)
                        .values(&new_proof_db)
                        .returning(ProofDocumentDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(ProofDocument::from(result_db))
                },
            )
            .await
    }

    async fn delete_proof(&self, proof_id: String) -> Result<ProofDocument> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<ProofDocument> {
                    let proof_db = proof_documents::table
                        .find(&proof_id)
                        .first::<ProofDocumentDB>(conn)
                        .map_err(StorageError::from)?;
                    diesel::delete(proof_documents::table.find(&proof_id))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    Ok(ProofDocument::from(proof_db))
                },
            )
            .await
    }
}

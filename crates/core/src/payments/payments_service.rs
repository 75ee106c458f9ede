use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::{Result, ValidationError};
use crate::payments::payments_errors::PaymentError;
use crate::payments::payments_model::{
    BulkPaymentError, BulkPaymentOutcome, NewPayment, NewProofDocument, Payment, ProofDocument,
};
use crate::payments::payments_traits::{PaymentRepositoryTrait, PaymentServiceTrait, ProofStore};
use crate::schedule::{InstallmentStatus, ScheduleRepositoryTrait};
use async_trait::async_trait;

pub struct PaymentService {
    repository: Arc<dyn PaymentRepositoryTrait>,
    schedule_repository: Arc<dyn ScheduleRepositoryTrait>,
    proof_store: Arc<dyn ProofStore>,
}

impl PaymentService {
    pub fn new(
        repository: Arc<dyn PaymentRepositoryTrait>,
        schedule_repository: Arc<dyn ScheduleRepositoryTrait>,
        proof_store: Arc<dyn ProofStore>,
    ) -> Self {
        PaymentService {
            repository,
            schedule_repository,
            proof_store,
        }
    }

    fn validate(new_payment: &NewPayment) -> Result<()> {
        if new_payment.amount <= Decimal::ZERO {
            return Err(PaymentError::InvalidAmount(new_payment.amount.to_string()).into());
        }
        Ok(())
    }

    /// Strips any path from an uploaded file name: only the final component
    /// is kept, and names that reduce to nothing (or to `.`/`..`) are
    /// rejected. The storage key doubles as a relative path in the proof
    /// store, so client input must never contribute separators.
    fn sanitize_file_name(file_name: &str) -> Result<String> {
        let name = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();
        if name.is_empty() || name == "." || name == ".." {
            return Err(ValidationError::InvalidInput(format!(
                "invalid proof file name: {file_name:?}"
            ))
            .into());
        }
        Ok(name.to_string())
    }

    /// Removes stored blobs for proofs whose rows are already gone.
    /// Best effort: a missing blob is logged, never surfaced.
    async fn cleanup_blobs(&self, proofs: &[ProofDocument]) {
        for proof in proofs {
            if let Err(e) = self.proof_store.remove(&proof.storage_key).await {
                warn!(
                    "Proof blob {} could not be removed after unmark: {}",
                    proof.storage_key, e
                );
            }
        }
    }
}

#[async_trait]
impl PaymentServiceTrait for PaymentService {
    fn get_payment_for_installment(&self, installment_id: &str) -> Result<Payment> {
        self.repository.get_payment_for_installment(installment_id)
    }

    fn list_proofs(&self, payment_id: &str) -> Result<Vec<ProofDocument>> {
        self.repository.list_proofs(payment_id)
    }

    async fn record_payment(&self, new_payment: NewPayment) -> Result<Payment> {
        Self::validate(&new_payment)?;
        self.repository.record_payment(new_payment).await
    }

    async fn record_payments_bulk(
        &self,
        requests: Vec<NewPayment>,
    ) -> Result<BulkPaymentOutcome> {
        let mut outcome = BulkPaymentOutcome::default();
        for request in requests {
            let installment_id = request.installment_id.clone();
            match self.record_payment(request).await {
                Ok(_) => outcome.succeeded += 1,
                Err(e) => {
                    warn!("Bulk payment failed for installment {installment_id}: {e}");
                    outcome.failed += 1;
                    outcome.errors.push(BulkPaymentError {
                        installment_id,
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(outcome)
    }

    async fn unmark_payment(&self, installment_id: String) -> Result<()> {
        // Row deletions and the installment reset commit atomically inside
        // the repository; blob removal is compensating cleanup afterwards.
        let removed_proofs = self.repository.unmark_payment(installment_id).await?;
        self.cleanup_blobs(&removed_proofs).await;
        Ok(())
    }

    async fn unmark_date_group(
        &self,
        due_date: NaiveDate,
        tranche_id: Option<String>,
    ) -> Result<BulkPaymentOutcome> {
        let snapshot = self.schedule_repository.load_schedule()?;
        let targets: Vec<String> = snapshot
            .iter()
            .filter(|inst| inst.due_date == due_date)
            .filter(|inst| {
                tranche_id
                    .as_deref()
                    .map_or(true, |t| inst.tranche_id == t)
            })
            .filter(|inst| inst.status == InstallmentStatus::Paid)
            .map(|inst| inst.id.clone())
            .collect();
        debug!(
            "Unmarking {} paid installments due {due_date}",
            targets.len()
        );

        let mut outcome = BulkPaymentOutcome::default();
        for installment_id in targets {
            match self.repository.unmark_payment(installment_id.clone()).await {
                Ok(removed_proofs) => {
                    self.cleanup_blobs(&removed_proofs).await;
                    outcome.succeeded += 1;
                }
                Err(e) => {
                    warn!("Unmark failed for installment {installment_id}: {e}");
                    outcome.failed += 1;
                    outcome.errors.push(BulkPaymentError {
                        installment_id,
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(outcome)
    }

    async fn attach_proof(
        &self,
        payment_id: String,
        file_name: String,
        content: Vec<u8>,
    ) -> Result<ProofDocument> {
        let file_name = Self::sanitize_file_name(&file_name)?;
        let storage_key = format!("{payment_id}/{}-{file_name}", Uuid::new_v4());
        self.proof_store.put(&storage_key, content).await?;
        self.repository
            .insert_proof(NewProofDocument {
                payment_id,
                file_name,
                storage_key,
            })
            .await
    }

    async fn remove_proof(&self, proof_id: String) -> Result<()> {
        let removed = self.repository.delete_proof(proof_id).await?;
        self.cleanup_blobs(std::slice::from_ref(&removed)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{CouponInstallment, NewCouponInstallment};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn installment(id: &str, due: &str, status: InstallmentStatus) -> CouponInstallment {
        CouponInstallment {
            id: id.to_string(),
            subscription_id: "sub-1".to_string(),
            due_date: date(due),
            gross_amount: dec!(130),
            net_amount: dec!(100),
            status,
            paid_date: None,
            paid_amount: None,
            investor_id: "inv-1".to_string(),
            investor_name: "Paul Mercier".to_string(),
            investor_type: "individual".to_string(),
            investor_email: None,
            advisor_name: None,
            project_id: "proj-1".to_string(),
            project_name: "Les Cèdres".to_string(),
            tranche_id: "t1".to_string(),
            tranche_name: "Tranche A".to_string(),
            has_bank_details: true,
            invested_amount: dec!(5000),
            is_final: false,
        }
    }

    #[derive(Default)]
    struct MockPaymentRepository {
        // installment id -> payment
        payments: Mutex<HashMap<String, Payment>>,
        proofs: Mutex<Vec<ProofDocument>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl PaymentRepositoryTrait for MockPaymentRepository {
        fn get_payment_for_installment(&self, installment_id: &str) -> Result<Payment> {
            self.payments
                .lock()
                .unwrap()
                .get(installment_id)
                .cloned()
                .ok_or_else(|| PaymentError::NoPaymentRecorded(installment_id.to_string()).into())
        }

        fn list_proofs(&self, payment_id: &str) -> Result<Vec<ProofDocument>> {
            Ok(self
                .proofs
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.payment_id == payment_id)
                .cloned()
                .collect())
        }

        async fn record_payment(&self, new_payment: NewPayment) -> Result<Payment> {
            if self.fail_on.as_deref() == Some(new_payment.installment_id.as_str()) {
                return Err(PaymentError::AlreadyPaid(new_payment.installment_id).into());
            }
            let payment = Payment {
                id: Uuid::new_v4().to_string(),
                installment_id: new_payment.installment_id.clone(),
                paid_date: new_payment.paid_date,
                amount: new_payment.amount,
                note: new_payment.note,
                created_at: Utc::now().naive_utc(),
            };
            self.payments
                .lock()
                .unwrap()
                .insert(new_payment.installment_id, payment.clone());
            Ok(payment)
        }

        async fn unmark_payment(&self, installment_id: String) -> Result<Vec<ProofDocument>> {
            if self.fail_on.as_deref() == Some(installment_id.as_str()) {
                return Err(PaymentError::NoPaymentRecorded(installment_id).into());
            }
            let payment = self
                .payments
                .lock()
                .unwrap()
                .remove(&installment_id)
                .ok_or(PaymentError::NoPaymentRecorded(installment_id))?;
            let mut proofs = self.proofs.lock().unwrap();
            let (removed, kept): (Vec<_>, Vec<_>) = proofs
                .drain(..)
                .partition(|p| p.payment_id == payment.id);
            *proofs = kept;
            Ok(removed)
        }

        async fn insert_proof(&self, new_proof: NewProofDocument) -> Result<ProofDocument> {
            let proof = ProofDocument {
                id: Uuid::new_v4().to_string(),
                payment_id: new_proof.payment_id,
                file_name: new_proof.file_name,
                storage_key: new_proof.storage_key,
                uploaded_at: Utc::now().naive_utc(),
            };
            self.proofs.lock().unwrap().push(proof.clone());
            Ok(proof)
        }

        async fn delete_proof(&self, proof_id: String) -> Result<ProofDocument> {
            let mut proofs = self.proofs.lock().unwrap();
            let idx = proofs
                .iter()
                .position(|p| p.id == proof_id)
                .ok_or(PaymentError::NoPaymentRecorded(proof_id))?;
            Ok(proofs.remove(idx))
        }
    }

    struct MockScheduleRepository {
        rows: Vec<CouponInstallment>,
    }

    #[async_trait]
    impl ScheduleRepositoryTrait for MockScheduleRepository {
        fn load_schedule(&self) -> Result<Vec<CouponInstallment>> {
            Ok(self.rows.clone())
        }
        fn get_installment(&self, _: &str) -> Result<CouponInstallment> {
            unimplemented!()
        }
        async fn insert_installments(&self, _: Vec<NewCouponInstallment>) -> Result<usize> {
            unimplemented!()
        }
    }

    #[derive(Default)]
    struct MockProofStore {
        removed: Mutex<Vec<String>>,
        stored: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ProofStore for MockProofStore {
        async fn put(&self, storage_key: &str, _content: Vec<u8>) -> Result<()> {
            self.stored.lock().unwrap().push(storage_key.to_string());
            Ok(())
        }
        async fn remove(&self, storage_key: &str) -> Result<()> {
            self.removed.lock().unwrap().push(storage_key.to_string());
            Ok(())
        }
    }

    fn service(
        repo: Arc<MockPaymentRepository>,
        rows: Vec<CouponInstallment>,
        store: Arc<MockProofStore>,
    ) -> PaymentService {
        PaymentService::new(repo, Arc::new(MockScheduleRepository { rows }), store)
    }

    fn new_payment(installment_id: &str) -> NewPayment {
        NewPayment {
            id: None,
            installment_id: installment_id.to_string(),
            paid_date: date("2025-06-02"),
            amount: dec!(140),
            note: None,
        }
    }

    #[tokio::test]
    async fn record_payment_rejects_non_positive_amount() {
        let svc = service(Arc::default(), vec![], Arc::default());
        let mut req = new_payment("i1");
        req.amount = dec!(0);
        let err = svc.record_payment(req).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Payment(PaymentError::InvalidAmount(_))
        ));
    }

    #[tokio::test]
    async fn bulk_record_continues_past_failures_and_tallies() {
        let repo = Arc::new(MockPaymentRepository {
            fail_on: Some("i2".to_string()),
            ..Default::default()
        });
        let svc = service(repo, vec![], Arc::default());
        let outcome = svc
            .record_payments_bulk(vec![
                new_payment("i1"),
                new_payment("i2"),
                new_payment("i3"),
            ])
            .await
            .unwrap();
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].installment_id, "i2");
    }

    #[tokio::test]
    async fn unmark_removes_proof_blobs_after_rows() {
        let repo = Arc::new(MockPaymentRepository::default());
        let store = Arc::new(MockProofStore::default());
        let svc = service(repo.clone(), vec![], store.clone());

        let payment = svc.record_payment(new_payment("i1")).await.unwrap();
        svc.attach_proof(payment.id.clone(), "virement.pdf".to_string(), vec![1, 2])
            .await
            .unwrap();

        svc.unmark_payment("i1".to_string()).await.unwrap();
        assert!(repo.payments.lock().unwrap().is_empty());
        assert!(repo.proofs.lock().unwrap().is_empty());
        assert_eq!(store.removed.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unmark_without_payment_is_an_error() {
        let svc = service(Arc::default(), vec![], Arc::default());
        let err = svc.unmark_payment("i1".to_string()).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Payment(PaymentError::NoPaymentRecorded(_))
        ));
    }

    #[tokio::test]
    async fn attach_proof_strips_path_components_from_file_names() {
        let repo = Arc::new(MockPaymentRepository::default());
        let store = Arc::new(MockProofStore::default());
        let svc = service(repo, vec![], store.clone());

        let proof = svc
            .attach_proof(
                "pay-1".to_string(),
                "../../../../etc/virement.pdf".to_string(),
                vec![1, 2],
            )
            .await
            .unwrap();
        assert_eq!(proof.file_name, "virement.pdf");
        assert!(!proof.storage_key.contains(".."));
        assert!(proof.storage_key.ends_with("-virement.pdf"));

        let stored = store.stored.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].contains(".."));
    }

    #[tokio::test]
    async fn attach_proof_rejects_file_names_without_a_real_component() {
        let svc = service(Arc::default(), vec![], Arc::default());
        for bad in [".." , "../", "", "  ", "a/b/.."] {
            let err = svc
                .attach_proof("pay-1".to_string(), bad.to_string(), vec![1])
                .await
                .unwrap_err();
            assert!(
                matches!(err, crate::Error::Validation(ValidationError::InvalidInput(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn unmark_date_group_targets_only_paid_rows_of_that_date() {
        let repo = Arc::new(MockPaymentRepository::default());
        let store = Arc::new(MockProofStore::default());
        let rows = vec![
            installment("i1", "2025-06-01", InstallmentStatus::Paid),
            installment("i2", "2025-06-01", InstallmentStatus::Pending),
            installment("i3", "2025-09-01", InstallmentStatus::Paid),
        ];
        let svc = service(repo.clone(), rows, store);
        svc.record_payment(new_payment("i1")).await.unwrap();
        svc.record_payment(new_payment("i3")).await.unwrap();

        let outcome = svc
            .unmark_date_group(date("2025-06-01"), None)
            .await
            .unwrap();
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.failed, 0);
        // The September payment is untouched.
        assert!(repo.payments.lock().unwrap().contains_key("i3"));
    }
}

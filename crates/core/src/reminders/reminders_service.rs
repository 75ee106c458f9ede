use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use log::{info, warn};
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::reminders::reminders_client::EmailDraftClientTrait;
use crate::reminders::reminders_model::{ReminderDraft, ReminderOutcome};
use crate::schedule::{schedule_engine, ComputedStatus, CouponInstallment, ScheduleRepositoryTrait};
use async_trait::async_trait;

/// Trait for reminder service operations
#[async_trait]
pub trait ReminderServiceTrait: Send + Sync {
    /// Composes one draft per investor with overdue installments and submits
    /// each to the email-draft collaborator. Continue-on-error with a tally.
    async fn send_overdue_reminders(&self, today: NaiveDate) -> Result<ReminderOutcome>;
}

pub struct ReminderService {
    schedule_repository: Arc<dyn ScheduleRepositoryTrait>,
    draft_client: Arc<dyn EmailDraftClientTrait>,
}

impl ReminderService {
    pub fn new(
        schedule_repository: Arc<dyn ScheduleRepositoryTrait>,
        draft_client: Arc<dyn EmailDraftClientTrait>,
    ) -> Self {
        ReminderService {
            schedule_repository,
            draft_client,
        }
    }

    /// Builds the drafts without sending them (grouping and wording only).
    pub fn compose_drafts(
        overdue: &[CouponInstallment],
    ) -> (Vec<ReminderDraft>, usize) {
        let mut by_investor: BTreeMap<String, Vec<&CouponInstallment>> = BTreeMap::new();
        for inst in overdue {
            by_investor
                .entry(inst.investor_id.clone())
                .or_default()
                .push(inst);
        }

        let mut drafts = Vec::new();
        let mut skipped_no_email = 0;
        for (investor_id, installments) in by_investor {
            let first = installments[0];
            let Some(email) = first.investor_email.clone() else {
                skipped_no_email += 1;
                continue;
            };

            let total_net: Decimal = installments.iter().map(|i| i.payable_net()).sum();
            let mut lines = vec![String::from(
                "Bonjour,\n\nSauf erreur de notre part, les échéances suivantes restent en attente de règlement :\n",
            )];
            for inst in &installments {
                lines.push(format!(
                    "  - {} — {} ({}) : {} € nets, échéance du {}",
                    inst.project_name,
                    inst.tranche_name,
                    inst.investor_name,
                    inst.payable_net(),
                    inst.due_date.format("%d/%m/%Y"),
                ));
            }
            lines.push(format!(
                "\nMontant total : {total_net} €.\n\nCordialement,\nLe back-office"
            ));

            drafts.push(ReminderDraft {
                investor_id,
                investor_name: first.investor_name.clone(),
                to: email,
                subject: format!(
                    "Rappel : {} échéance(s) de coupon en retard",
                    installments.len()
                ),
                body: lines.join("\n"),
                installment_count: installments.len(),
                total_net,
            });
        }
        (drafts, skipped_no_email)
    }
}

#[async_trait]
impl ReminderServiceTrait for ReminderService {
    async fn send_overdue_reminders(&self, today: NaiveDate) -> Result<ReminderOutcome> {
        let snapshot = self.schedule_repository.load_schedule()?;
        let overdue: Vec<CouponInstallment> = snapshot
            .into_iter()
            .filter(|inst| schedule_engine::compute_status(inst, today) == ComputedStatus::EnRetard)
            .collect();

        let (drafts, skipped_no_email) = Self::compose_drafts(&overdue);
        info!(
            "Submitting {} overdue reminder drafts ({} investors without email)",
            drafts.len(),
            skipped_no_email
        );

        let mut outcome = ReminderOutcome {
            skipped_no_email,
            ..Default::default()
        };
        for draft in drafts {
            match self
                .draft_client
                .create_draft(&draft.to, &draft.subject, &draft.body)
                .await
            {
                Ok(()) => outcome.drafts_created += 1,
                Err(e) => {
                    warn!("Reminder draft for {} failed: {e}", draft.investor_name);
                    outcome.failed += 1;
                    outcome.errors.push(format!("{}: {e}", draft.investor_name));
                }
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{InstallmentStatus, NewCouponInstallment};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn installment(
        id: &str,
        investor_id: &str,
        email: Option<&str>,
        status: InstallmentStatus,
    ) -> CouponInstallment {
        CouponInstallment {
            id: id.to_string(),
            subscription_id: "sub-1".to_string(),
            due_date: date("2025-06-01"),
            gross_amount: dec!(130),
            net_amount: dec!(100),
            status,
            paid_date: None,
            paid_amount: None,
            investor_id: investor_id.to_string(),
            investor_name: format!("Investor {investor_id}"),
            investor_type: "individual".to_string(),
            investor_email: email.map(str::to_string),
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
    struct RecordingDraftClient {
        sent: Mutex<Vec<(String, String)>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl EmailDraftClientTrait for RecordingDraftClient {
        async fn create_draft(&self, to: &str, subject: &str, _body: &str) -> Result<()> {
            if self.fail_for.as_deref() == Some(to) {
                return Err(crate::reminders::ReminderError::Rejected {
                    status: 502,
                    message: "upstream unavailable".to_string(),
                }
                .into());
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn one_draft_per_overdue_investor_skipping_missing_emails() {
        let rows = vec![
            installment("i1", "inv-a", Some("a@ex.fr"), InstallmentStatus::Pending),
            installment("i2", "inv-a", Some("a@ex.fr"), InstallmentStatus::Pending),
            installment("i3", "inv-b", None, InstallmentStatus::Pending),
            installment("i4", "inv-c", Some("c@ex.fr"), InstallmentStatus::Paid),
        ];
        let client = Arc::new(RecordingDraftClient::default());
        let svc = ReminderService::new(
            Arc::new(MockScheduleRepository { rows }),
            client.clone(),
        );
        let outcome = svc.send_overdue_reminders(date("2025-07-01")).await.unwrap();
        assert_eq!(outcome.drafts_created, 1);
        assert_eq!(outcome.skipped_no_email, 1);
        assert_eq!(outcome.failed, 0);

        let sent = client.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "a@ex.fr");
        // Both of inv-a's installments are on the one draft.
        assert!(sent[0].1.contains('2'));
    }

    #[tokio::test]
    async fn submission_failures_are_tallied_not_fatal() {
        let rows = vec![
            installment("i1", "inv-a", Some("a@ex.fr"), InstallmentStatus::Pending),
            installment("i2", "inv-b", Some("b@ex.fr"), InstallmentStatus::Pending),
        ];
        let client = Arc::new(RecordingDraftClient {
            fail_for: Some("a@ex.fr".to_string()),
            ..Default::default()
        });
        let svc = ReminderService::new(
            Arc::new(MockScheduleRepository { rows }),
            client.clone(),
        );
        let outcome = svc.send_overdue_reminders(date("2025-07-01")).await.unwrap();
        assert_eq!(outcome.drafts_created, 1);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn draft_totals_include_principal_on_final_installments() {
        let mut inst = installment("i1", "inv-a", Some("a@ex.fr"), InstallmentStatus::Pending);
        inst.is_final = true;
        let (drafts, skipped) = ReminderService::compose_drafts(&[inst]);
        assert_eq!(skipped, 0);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].total_net, dec!(5100));
    }
}

use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use crate::constants::{DISPLAY_DECIMAL_PRECISION, WITHHOLDING_TAX_RATE};
use crate::errors::{Result, ValidationError};
use crate::investors::{InvestorKind, InvestorRepositoryTrait};
use crate::schedule::NewCouponInstallment;
use crate::subscriptions::subscriptions_model::{NewSubscription, Subscription};
use crate::subscriptions::subscriptions_traits::{
    SubscriptionRepositoryTrait, SubscriptionServiceTrait,
};
use crate::tranches::{Tranche, TrancheRepositoryTrait};
use async_trait::async_trait;

pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepositoryTrait>,
    tranche_repository: Arc<dyn TrancheRepositoryTrait>,
    investor_repository: Arc<dyn InvestorRepositoryTrait>,
}

impl SubscriptionService {
    pub fn new(
        repository: Arc<dyn SubscriptionRepositoryTrait>,
        tranche_repository: Arc<dyn TrancheRepositoryTrait>,
        investor_repository: Arc<dyn InvestorRepositoryTrait>,
    ) -> Self {
        SubscriptionService {
            repository,
            tranche_repository,
            investor_repository,
        }
    }
}

/// Generates the coupon installment rows for one subscription.
///
/// One row per coupon date of the tranche. Gross coupon per period is
/// `invested × annual rate / periods per year`; the net amount withholds the
/// flat tax for individual investors and equals gross for companies. Both
/// are rounded to display precision. The subscription id must already be
/// known (rows reference it).
pub fn generate_installments(
    subscription_id: &str,
    tranche: &Tranche,
    investor_kind: InvestorKind,
    invested_amount: Decimal,
) -> Vec<NewCouponInstallment> {
    let periods = Decimal::from(tranche.frequency.periods_per_year());
    let gross = (invested_amount * tranche.annual_rate / periods)
        .round_dp(DISPLAY_DECIMAL_PRECISION);
    let net = match investor_kind {
        InvestorKind::Individual => {
            (gross * (Decimal::ONE - WITHHOLDING_TAX_RATE)).round_dp(DISPLAY_DECIMAL_PRECISION)
        }
        InvestorKind::Company => gross,
    };

    tranche
        .coupon_dates()
        .into_iter()
        .map(|due_date| NewCouponInstallment {
            subscription_id: subscription_id.to_string(),
            due_date,
            gross_amount: gross,
            net_amount: net,
        })
        .collect()
}

#[async_trait]
impl SubscriptionServiceTrait for SubscriptionService {
    fn get_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.repository.load_subscriptions()
    }

    fn get_subscription(&self, subscription_id: &str) -> Result<Subscription> {
        self.repository.get_subscription(subscription_id)
    }

    async fn create_subscription(
        &self,
        mut new_subscription: NewSubscription,
    ) -> Result<Subscription> {
        if new_subscription.invested_amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "invested amount must be positive".to_string(),
            )
            .into());
        }
        let tranche = self
            .tranche_repository
            .get_tranche(&new_subscription.tranche_id)?;
        let investor = self
            .investor_repository
            .get_investor(&new_subscription.investor_id)?;

        // The installment rows reference the subscription id, so fix it here
        // rather than in the repository.
        let subscription_id = new_subscription
            .id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();
        let installments = generate_installments(
            &subscription_id,
            &tranche,
            investor.kind,
            new_subscription.invested_amount,
        );
        debug!(
            "Creating subscription {} with {} installments",
            subscription_id,
            installments.len()
        );
        self.repository
            .insert_subscription_with_installments(new_subscription, installments)
            .await
    }

    async fn delete_subscription(&self, subscription_id_to_delete: String) -> Result<usize> {
        self.repository
            .delete_subscription(subscription_id_to_delete)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tranches::CouponFrequency;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn tranche(frequency: CouponFrequency, rate: Decimal) -> Tranche {
        Tranche {
            id: "t1".to_string(),
            project_id: "p1".to_string(),
            name: "Tranche A".to_string(),
            annual_rate: rate,
            frequency,
            issue_date: date("2025-01-15"),
            maturity_date: date("2027-01-15"),
            created_at: date("2025-01-15").and_hms_opt(0, 0, 0).unwrap(),
            updated_at: date("2025-01-15").and_hms_opt(0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn quarterly_generation_amounts_and_final_date() {
        let t = tranche(CouponFrequency::Quarterly, dec!(0.08));
        let rows = generate_installments("sub-1", &t, InvestorKind::Individual, dec!(10000));
        assert_eq!(rows.len(), 8);
        // 10 000 × 0.08 / 4 = 200 gross, 140 net after 30% withholding.
        assert!(rows.iter().all(|r| r.gross_amount == dec!(200)));
        assert!(rows.iter().all(|r| r.net_amount == dec!(140.00)));
        assert_eq!(rows.last().unwrap().due_date, t.maturity_date);
    }

    #[test]
    fn company_investors_are_paid_gross() {
        let t = tranche(CouponFrequency::Annual, dec!(0.06));
        let rows = generate_installments("sub-1", &t, InvestorKind::Company, dec!(50000));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.gross_amount == dec!(3000)));
        assert!(rows.iter().all(|r| r.net_amount == dec!(3000)));
    }

    #[test]
    fn amounts_round_to_display_precision() {
        let t = tranche(CouponFrequency::Monthly, dec!(0.07));
        let rows = generate_installments("sub-1", &t, InvestorKind::Individual, dec!(12345));
        // 12 345 × 0.07 / 12 = 72.0125 → 72.01 gross; 72.01 × 0.7 = 50.407 → 50.41 net.
        assert_eq!(rows[0].gross_amount, dec!(72.01));
        assert_eq!(rows[0].net_amount, dec!(50.41));
    }
}

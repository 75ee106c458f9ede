use chrono::NaiveDate;

use crate::errors::Result;
use crate::schedule::schedule_model::{
    DashboardStats, DateGroup, ScheduleFilter, ScheduleSearchResponse, TrancheGroup,
};
use crate::schedule::CouponInstallment;
use async_trait::async_trait;

/// Trait for schedule repository operations.
///
/// `load_schedule` is the single bulk read: the joined installment view
/// (subscription, investor, project, tranche attributes), sorted by due
/// date, capped at `constants::MAX_SCHEDULE_ROWS`.
#[async_trait]
pub trait ScheduleRepositoryTrait: Send + Sync {
    fn load_schedule(&self) -> Result<Vec<CouponInstallment>>;
    fn get_installment(&self, installment_id: &str) -> Result<CouponInstallment>;
    async fn insert_installments(
        &self,
        installments: Vec<crate::schedule::NewCouponInstallment>,
    ) -> Result<usize>;
}

/// Trait for schedule service operations. `today` is injected by the caller
/// so the derived views stay deterministic and testable.
pub trait ScheduleServiceTrait: Send + Sync {
    fn search(
        &self,
        criteria: ScheduleFilter,
        page: i64,
        page_size: i64,
        today: NaiveDate,
    ) -> Result<ScheduleSearchResponse>;
    fn grouped_by_date(&self, criteria: ScheduleFilter, today: NaiveDate)
        -> Result<Vec<DateGroup>>;
    fn grouped_by_tranche(
        &self,
        criteria: ScheduleFilter,
        today: NaiveDate,
    ) -> Result<Vec<TrancheGroup>>;
    fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats>;
}

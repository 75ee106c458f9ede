use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use crate::errors::Result;

use super::schedule_engine;
use super::schedule_model::{
    DashboardStats, DateGroup, ScheduleFilter, ScheduleItem, ScheduleSearchResponse, TrancheGroup,
};
use super::schedule_traits::{ScheduleRepositoryTrait, ScheduleServiceTrait};

/// Serves the derived schedule views.
///
/// Each call is a full refetch of the installment snapshot followed by pure
/// in-memory shaping; there is no cached derived state to go stale.
pub struct ScheduleService {
    repository: Arc<dyn ScheduleRepositoryTrait>,
}

impl ScheduleService {
    pub fn new(repository: Arc<dyn ScheduleRepositoryTrait>) -> Self {
        ScheduleService { repository }
    }
}

impl ScheduleServiceTrait for ScheduleService {
    fn search(
        &self,
        criteria: ScheduleFilter,
        page: i64,
        page_size: i64,
        today: NaiveDate,
    ) -> Result<ScheduleSearchResponse> {
        let snapshot = self.repository.load_schedule()?;
        let filtered = schedule_engine::filter(&snapshot, &criteria, today);
        debug!(
            "Schedule search: {} of {} installments match",
            filtered.len(),
            snapshot.len()
        );
        let total_row_count = filtered.len();
        let items: Vec<ScheduleItem> = schedule_engine::paginate(&filtered, page, page_size)
            .into_iter()
            .map(|installment| ScheduleItem {
                computed_status: schedule_engine::compute_status(&installment, today),
                days_remaining: schedule_engine::days_remaining(&installment, today),
                installment,
            })
            .collect();
        Ok(ScheduleSearchResponse {
            items,
            total_row_count,
            total_pages: schedule_engine::total_pages(total_row_count, page_size),
            page,
            page_size,
        })
    }

    fn grouped_by_date(
        &self,
        criteria: ScheduleFilter,
        today: NaiveDate,
    ) -> Result<Vec<DateGroup>> {
        let snapshot = self.repository.load_schedule()?;
        let filtered = schedule_engine::filter(&snapshot, &criteria, today);
        Ok(schedule_engine::group_by_date(&filtered, today))
    }

    fn grouped_by_tranche(
        &self,
        criteria: ScheduleFilter,
        today: NaiveDate,
    ) -> Result<Vec<TrancheGroup>> {
        let snapshot = self.repository.load_schedule()?;
        let filtered = schedule_engine::filter(&snapshot, &criteria, today);
        Ok(schedule_engine::group_by_tranche_then_date(&filtered, today))
    }

    fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats> {
        let snapshot = self.repository.load_schedule()?;
        Ok(schedule_engine::dashboard_stats(&snapshot, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::schedule_model::{CouponInstallment, InstallmentStatus};
    use crate::schedule::NewCouponInstallment;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

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

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(id: &str, due: &str) -> CouponInstallment {
        CouponInstallment {
            id: id.to_string(),
            subscription_id: "sub-1".to_string(),
            due_date: date(due),
            gross_amount: dec!(130),
            net_amount: dec!(100),
            status: InstallmentStatus::Pending,
            paid_date: None,
            paid_amount: None,
            investor_id: "inv-1".to_string(),
            investor_name: "Marie Lenoir".to_string(),
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

    #[test]
    fn search_paginates_and_reports_totals() {
        let rows: Vec<_> = (0..7).map(|i| row(&format!("i{i}"), "2025-06-01")).collect();
        let service = ScheduleService::new(Arc::new(MockScheduleRepository { rows }));
        let resp = service
            .search(ScheduleFilter::default(), 2, 3, date("2025-01-01"))
            .unwrap();
        assert_eq!(resp.total_row_count, 7);
        assert_eq!(resp.total_pages, 3);
        assert_eq!(resp.items.len(), 3);
        assert_eq!(resp.items[0].installment.id, "i3");
        assert_eq!(resp.items[0].days_remaining, 151);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let service = ScheduleService::new(Arc::new(MockScheduleRepository {
            rows: vec![row("a", "2025-06-01")],
        }));
        let resp = service
            .search(ScheduleFilter::default(), 9, 50, date("2025-01-01"))
            .unwrap();
        assert!(resp.items.is_empty());
        assert_eq!(resp.total_row_count, 1);
    }
}

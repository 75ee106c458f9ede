//! Pure shaping functions over an in-memory installment snapshot.
//!
//! Everything here is a total, synchronous function: `today` is always an
//! explicit parameter (never read from a clock) and the input slice is never
//! mutated. The service layer fetches the snapshot and calls into this
//! module; the functions themselves have no failure modes on well-typed
//! input.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::schedule_model::{
    ComputedStatus, CouponInstallment, DashboardBucket, DashboardStats, DateGroup,
    DateGroupStatus, InstallmentStatus, ScheduleFilter, TrancheGroup,
};

/// Derives the display status of one installment.
///
/// Paid persisted status always wins, regardless of due date.
pub fn compute_status(installment: &CouponInstallment, today: NaiveDate) -> ComputedStatus {
    if installment.status == InstallmentStatus::Paid {
        ComputedStatus::Paye
    } else if installment.due_date < today {
        ComputedStatus::EnRetard
    } else {
        ComputedStatus::EnAttente
    }
}

/// Days until the due date; negative when overdue.
pub fn days_remaining(installment: &CouponInstallment, today: NaiveDate) -> i64 {
    (installment.due_date - today).num_days()
}

/// Partitions installments by exact due date, ascending.
///
/// Date equality is day-granular; callers supply dates already normalized
/// to a single zone (no timezone handling happens here).
pub fn group_by_date(installments: &[CouponInstallment], today: NaiveDate) -> Vec<DateGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&CouponInstallment>> = BTreeMap::new();
    for installment in installments {
        by_date.entry(installment.due_date).or_default().push(installment);
    }

    by_date
        .into_iter()
        .map(|(due_date, members)| build_date_group(due_date, &members, today))
        .collect()
}

/// Two-level grouping: tranche id on the outside, due date inside.
///
/// The grouping key is always the tranche id; colliding tranche names are
/// never merged. Tranches are ordered by name then id for stable output.
pub fn group_by_tranche_then_date(
    installments: &[CouponInstallment],
    today: NaiveDate,
) -> Vec<TrancheGroup> {
    let mut by_tranche: BTreeMap<(String, String), Vec<CouponInstallment>> = BTreeMap::new();
    for installment in installments {
        by_tranche
            .entry((installment.tranche_name.clone(), installment.tranche_id.clone()))
            .or_default()
            .push(installment.clone());
    }

    by_tranche
        .into_iter()
        .map(|((tranche_name, tranche_id), members)| {
            let date_groups = group_by_date(&members, today);
            TrancheGroup {
                tranche_id,
                tranche_name,
                total_gross: date_groups.iter().map(|g| g.total_gross).sum(),
                total_net: date_groups.iter().map(|g| g.total_net).sum(),
                total_nominal: date_groups.iter().map(|g| g.total_nominal).sum(),
                paid_count: date_groups.iter().map(|g| g.paid_count).sum(),
                total_count: date_groups.iter().map(|g| g.total_count).sum(),
                date_groups,
            }
        })
        .collect()
}

fn build_date_group(
    due_date: NaiveDate,
    members: &[&CouponInstallment],
    today: NaiveDate,
) -> DateGroup {
    let total_count = members.len();
    let mut paid_count = 0;
    let mut overdue_count = 0;
    let mut total_gross = Decimal::ZERO;
    let mut total_net = Decimal::ZERO;
    let mut total_nominal = Decimal::ZERO;

    for installment in members {
        total_gross += installment.gross_amount;
        total_net += installment.net_amount;
        if installment.is_final {
            total_nominal += installment.invested_amount;
        }
        match compute_status(installment, today) {
            ComputedStatus::Paye => paid_count += 1,
            ComputedStatus::EnRetard => overdue_count += 1,
            ComputedStatus::EnAttente => {}
        }
    }

    let status = date_group_status(paid_count, overdue_count, total_count);

    DateGroup {
        due_date,
        total_gross,
        total_net,
        total_nominal,
        paid_count,
        total_count,
        status,
    }
}

/// Aggregate status precedence: fully paid, then any-paid, then the
/// overdue shadings over a fully unpaid group.
fn date_group_status(
    paid_count: usize,
    overdue_count: usize,
    total_count: usize,
) -> DateGroupStatus {
    if total_count > 0 && paid_count == total_count {
        DateGroupStatus::AllPaid
    } else if paid_count > 0 {
        DateGroupStatus::Partial
    } else if overdue_count == total_count && total_count > 0 {
        DateGroupStatus::AllLate
    } else if overdue_count > 0 {
        DateGroupStatus::Mixed
    } else {
        DateGroupStatus::AllPending
    }
}

/// Applies the filter criteria, AND across fields. Non-mutating; the result
/// is a fresh vector over the same snapshot.
pub fn filter(
    installments: &[CouponInstallment],
    criteria: &ScheduleFilter,
    today: NaiveDate,
) -> Vec<CouponInstallment> {
    let search = criteria
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    installments
        .iter()
        .filter(|inst| {
            if let Some(ref needle) = search {
                let hit = inst.investor_name.to_lowercase().contains(needle)
                    || inst.project_name.to_lowercase().contains(needle)
                    || inst.tranche_name.to_lowercase().contains(needle);
                if !hit {
                    return false;
                }
            }
            if let Some(ref statuses) = criteria.statuses {
                if !statuses.is_empty() && !statuses.contains(&compute_status(inst, today)) {
                    return false;
                }
            }
            if let Some(ref projects) = criteria.project_names {
                if !projects.is_empty() && !projects.contains(&inst.project_name) {
                    return false;
                }
            }
            if let Some(ref tranches) = criteria.tranche_names {
                if !tranches.is_empty() && !tranches.contains(&inst.tranche_name) {
                    return false;
                }
            }
            if let Some(ref advisors) = criteria.advisor_names {
                if !advisors.is_empty() {
                    match inst.advisor_name {
                        Some(ref advisor) if advisors.contains(advisor) => {}
                        _ => return false,
                    }
                }
            }
            if let Some(from) = criteria.date_from {
                if inst.due_date < from {
                    return false;
                }
            }
            if let Some(to) = criteria.date_to {
                if inst.due_date > to {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Contiguous 1-based page slice; a page beyond range yields an empty slice,
/// however far beyond (including offsets past `i64::MAX`).
pub fn paginate<T: Clone>(items: &[T], page: i64, page_size: i64) -> Vec<T> {
    if page < 1 || page_size < 1 {
        return Vec::new();
    }
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return Vec::new();
    };
    let start = start as usize;
    if start >= items.len() {
        return Vec::new();
    }
    let end = (start + page_size as usize).min(items.len());
    items[start..end].to_vec()
}

/// `ceil(count / page_size)`; zero items is zero pages.
pub fn total_pages(count: usize, page_size: i64) -> i64 {
    if page_size < 1 {
        return 0;
    }
    (count as i64 + page_size - 1) / page_size
}

/// Global totals for the dashboard header.
///
/// Per bucket: `count` is the number of distinct due dates with at least one
/// installment in that bucket, `total` sums the payable net (coupon plus
/// principal for final installments). The paid bucket prefers the recorded
/// paid amount when one was captured.
pub fn dashboard_stats(installments: &[CouponInstallment], today: NaiveDate) -> DashboardStats {
    let mut buckets: [(std::collections::BTreeSet<NaiveDate>, Decimal); 3] = Default::default();

    for inst in installments {
        let (idx, amount) = match compute_status(inst, today) {
            ComputedStatus::EnAttente => (0, inst.payable_net()),
            ComputedStatus::Paye => (1, inst.paid_amount.unwrap_or_else(|| inst.payable_net())),
            ComputedStatus::EnRetard => (2, inst.payable_net()),
        };
        buckets[idx].0.insert(inst.due_date);
        buckets[idx].1 += amount;
    }

    let bucket = |i: usize| DashboardBucket {
        count: buckets[i].0.len(),
        total: buckets[i].1,
    };

    DashboardStats {
        pending: bucket(0),
        paid: bucket(1),
        overdue: bucket(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn installment(id: &str, due: &str, net: Decimal, status: InstallmentStatus) -> CouponInstallment {
        CouponInstallment {
            id: id.to_string(),
            subscription_id: format!("sub-{id}"),
            due_date: date(due),
            gross_amount: net * dec!(1.3),
            net_amount: net,
            status,
            paid_date: None,
            paid_amount: None,
            investor_id: format!("inv-{id}"),
            investor_name: format!("Investor {id}"),
            investor_type: "individual".to_string(),
            investor_email: None,
            advisor_name: None,
            project_id: "proj-1".to_string(),
            project_name: "Résidence Les Cèdres".to_string(),
            tranche_id: "t1".to_string(),
            tranche_name: "Tranche A".to_string(),
            has_bank_details: true,
            invested_amount: dec!(10000),
            is_final: false,
        }
    }

    #[test]
    fn paid_status_wins_regardless_of_due_date() {
        let mut inst = installment("a", "2020-01-01", dec!(100), InstallmentStatus::Paid);
        inst.paid_date = Some(date("2020-01-02"));
        assert_eq!(compute_status(&inst, date("2025-01-01")), ComputedStatus::Paye);
    }

    #[test]
    fn overdue_when_due_date_before_today() {
        let inst = installment("a", "2025-06-01", dec!(100), InstallmentStatus::Pending);
        assert_eq!(compute_status(&inst, date("2025-07-01")), ComputedStatus::EnRetard);
        assert_eq!(compute_status(&inst, date("2025-06-01")), ComputedStatus::EnAttente);
        assert_eq!(compute_status(&inst, date("2025-05-01")), ComputedStatus::EnAttente);
    }

    #[test]
    fn days_remaining_negative_when_overdue() {
        let inst = installment("a", "2025-06-01", dec!(100), InstallmentStatus::Pending);
        assert_eq!(days_remaining(&inst, date("2025-05-22")), 10);
        assert_eq!(days_remaining(&inst, date("2025-06-04")), -3);
    }

    #[test]
    fn group_by_date_one_paid_rest_overdue_is_partial() {
        // Spec worked example: due 2025-06-01, three investors (100/200/300
        // net), one paid, today 2025-07-01.
        let installments = vec![
            installment("a", "2025-06-01", dec!(100), InstallmentStatus::Paid),
            installment("b", "2025-06-01", dec!(200), InstallmentStatus::Pending),
            installment("c", "2025-06-01", dec!(300), InstallmentStatus::Pending),
        ];
        let groups = group_by_date(&installments, date("2025-07-01"));
        assert_eq!(groups.len(), 1);
        let g = &groups[0];
        assert_eq!(g.total_net, dec!(600));
        assert_eq!(g.paid_count, 1);
        assert_eq!(g.total_count, 3);
        assert_eq!(g.status, DateGroupStatus::Partial);
    }

    #[test]
    fn group_by_date_before_due_date_is_all_pending() {
        let installments = vec![
            installment("a", "2025-06-01", dec!(100), InstallmentStatus::Pending),
            installment("b", "2025-06-01", dec!(200), InstallmentStatus::Pending),
            installment("c", "2025-06-01", dec!(300), InstallmentStatus::Pending),
        ];
        let groups = group_by_date(&installments, date("2025-05-01"));
        assert_eq!(groups[0].paid_count, 0);
        assert_eq!(groups[0].status, DateGroupStatus::AllPending);
    }

    #[test]
    fn group_by_date_none_paid_all_overdue_is_all_late() {
        let installments = vec![
            installment("a", "2025-06-01", dec!(100), InstallmentStatus::Pending),
            installment("b", "2025-06-01", dec!(200), InstallmentStatus::Pending),
        ];
        let groups = group_by_date(&installments, date("2025-07-01"));
        assert_eq!(groups[0].status, DateGroupStatus::AllLate);
    }

    #[test]
    fn group_by_date_all_paid() {
        let installments = vec![
            installment("a", "2025-06-01", dec!(100), InstallmentStatus::Paid),
            installment("b", "2025-06-01", dec!(200), InstallmentStatus::Paid),
        ];
        let groups = group_by_date(&installments, date("2025-07-01"));
        assert_eq!(groups[0].status, DateGroupStatus::AllPaid);
        assert_eq!(groups[0].paid_count, groups[0].total_count);
    }

    #[test]
    fn group_counts_cover_every_installment() {
        let installments = vec![
            installment("a", "2025-03-01", dec!(100), InstallmentStatus::Paid),
            installment("b", "2025-06-01", dec!(200), InstallmentStatus::Pending),
            installment("c", "2025-06-01", dec!(300), InstallmentStatus::Pending),
            installment("d", "2025-09-01", dec!(150), InstallmentStatus::Pending),
        ];
        let groups = group_by_date(&installments, date("2025-07-01"));
        let total: usize = groups.iter().map(|g| g.total_count).sum();
        assert_eq!(total, installments.len());
        // Ascending due-date order.
        let dates: Vec<_> = groups.iter().map(|g| g.due_date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn final_installment_contributes_principal_to_nominal() {
        let mut final_inst = installment("a", "2026-06-01", dec!(100), InstallmentStatus::Pending);
        final_inst.is_final = true;
        let other = installment("b", "2026-06-01", dec!(200), InstallmentStatus::Pending);
        let groups = group_by_date(&[final_inst, other], date("2025-01-01"));
        assert_eq!(groups[0].total_nominal, dec!(10000));
        assert_eq!(groups[0].total_net, dec!(300));
    }

    #[test]
    fn tranche_grouping_keys_on_id_not_name() {
        let mut a = installment("a", "2025-06-01", dec!(100), InstallmentStatus::Pending);
        let mut b = installment("b", "2025-06-01", dec!(200), InstallmentStatus::Pending);
        // Same display name, different tranches: must not merge.
        a.tranche_id = "t1".to_string();
        b.tranche_id = "t2".to_string();
        a.tranche_name = "Tranche A".to_string();
        b.tranche_name = "Tranche A".to_string();
        let groups = group_by_tranche_then_date(&[a, b], date("2025-01-01"));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].total_count, 1);
        assert_eq!(groups[1].total_count, 1);
    }

    #[test]
    fn tranche_totals_sum_nested_date_groups() {
        let mut a = installment("a", "2025-06-01", dec!(100), InstallmentStatus::Paid);
        let mut b = installment("b", "2025-12-01", dec!(200), InstallmentStatus::Pending);
        a.tranche_id = "t1".to_string();
        b.tranche_id = "t1".to_string();
        let groups = group_by_tranche_then_date(&[a, b], date("2025-07-01"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].date_groups.len(), 2);
        assert_eq!(groups[0].total_net, dec!(300));
        assert_eq!(groups[0].paid_count, 1);
        assert_eq!(groups[0].total_count, 2);
    }

    #[test]
    fn filter_is_conjunctive_and_search_spans_three_fields() {
        let mut by_project = installment("a", "2025-06-01", dec!(100), InstallmentStatus::Pending);
        by_project.project_name = "Villa Horizon".to_string();
        let mut by_investor = installment("b", "2025-06-01", dec!(200), InstallmentStatus::Pending);
        by_investor.investor_name = "Horizon Capital".to_string();
        let unrelated = installment("c", "2025-06-01", dec!(300), InstallmentStatus::Pending);

        let snapshot = vec![by_project, by_investor, unrelated];
        let criteria = ScheduleFilter {
            search: Some("horizon".to_string()),
            ..Default::default()
        };
        let hits = filter(&snapshot, &criteria, date("2025-01-01"));
        assert_eq!(hits.len(), 2);

        // AND with a project restriction narrows further.
        let criteria = ScheduleFilter {
            search: Some("horizon".to_string()),
            project_names: Some(vec!["Villa Horizon".to_string()]),
            ..Default::default()
        };
        let hits = filter(&snapshot, &criteria, date("2025-01-01"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn filter_by_computed_status_and_date_range() {
        let snapshot = vec![
            installment("a", "2025-03-01", dec!(100), InstallmentStatus::Pending),
            installment("b", "2025-06-01", dec!(200), InstallmentStatus::Paid),
            installment("c", "2025-09-01", dec!(300), InstallmentStatus::Pending),
        ];
        let today = date("2025-05-01");

        let criteria = ScheduleFilter {
            statuses: Some(vec![ComputedStatus::EnRetard]),
            ..Default::default()
        };
        let hits = filter(&snapshot, &criteria, today);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");

        let criteria = ScheduleFilter {
            date_from: Some(date("2025-04-01")),
            date_to: Some(date("2025-08-01")),
            ..Default::default()
        };
        let hits = filter(&snapshot, &criteria, today);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");
    }

    #[test]
    fn filter_missing_advisor_never_matches_advisor_criterion() {
        let mut with_advisor = installment("a", "2025-06-01", dec!(100), InstallmentStatus::Pending);
        with_advisor.advisor_name = Some("Cabinet Dupont".to_string());
        let without = installment("b", "2025-06-01", dec!(200), InstallmentStatus::Pending);

        let criteria = ScheduleFilter {
            advisor_names: Some(vec!["Cabinet Dupont".to_string()]),
            ..Default::default()
        };
        let hits = filter(&[with_advisor, without], &criteria, date("2025-01-01"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");
    }

    #[test]
    fn filter_is_idempotent() {
        let snapshot = vec![
            installment("a", "2025-03-01", dec!(100), InstallmentStatus::Pending),
            installment("b", "2025-06-01", dec!(200), InstallmentStatus::Paid),
        ];
        let criteria = ScheduleFilter {
            statuses: Some(vec![ComputedStatus::EnAttente, ComputedStatus::EnRetard]),
            ..Default::default()
        };
        let today = date("2025-01-01");
        let once = filter(&snapshot, &criteria, today);
        let twice = filter(&once, &criteria, today);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_criteria_impose_no_constraint() {
        let snapshot = vec![
            installment("a", "2025-03-01", dec!(100), InstallmentStatus::Pending),
            installment("b", "2025-06-01", dec!(200), InstallmentStatus::Paid),
        ];
        let hits = filter(&snapshot, &ScheduleFilter::default(), date("2025-01-01"));
        assert_eq!(hits.len(), snapshot.len());
    }

    #[test]
    fn pagination_slices_are_disjoint_and_cover_input() {
        let items: Vec<i32> = (0..10).collect();
        let mut reassembled = Vec::new();
        for page in 1..=4 {
            reassembled.extend(paginate(&items, page, 3));
        }
        assert_eq!(reassembled, items);
        assert_eq!(total_pages(10, 3), 4);
        assert!(paginate(&items, 5, 3).is_empty());
        assert!(paginate(&items, 99, 3).is_empty());
        // Offsets past i64 range are just another out-of-range page.
        assert!(paginate(&items, i64::MAX, 50).is_empty());
        assert!(paginate(&items, i64::MAX, i64::MAX).is_empty());
    }

    #[test]
    fn dashboard_counts_distinct_dates_not_installments() {
        // Two overdue installments on the same date, net 150 each:
        // one distinct date, total 300.
        let snapshot = vec![
            installment("a", "2025-06-01", dec!(150), InstallmentStatus::Pending),
            installment("b", "2025-06-01", dec!(150), InstallmentStatus::Pending),
        ];
        let stats = dashboard_stats(&snapshot, date("2025-07-01"));
        assert_eq!(stats.overdue.count, 1);
        assert_eq!(stats.overdue.total, dec!(300));
        assert_eq!(stats.pending.count, 0);
        assert_eq!(stats.paid.count, 0);
    }

    #[test]
    fn dashboard_paid_bucket_prefers_recorded_paid_amount() {
        let mut paid = installment("a", "2025-06-01", dec!(100), InstallmentStatus::Paid);
        paid.paid_amount = Some(dec!(95.50));
        let mut paid_no_amount = installment("b", "2025-06-02", dec!(200), InstallmentStatus::Paid);
        paid_no_amount.is_final = true; // falls back to net + principal
        let stats = dashboard_stats(&[paid, paid_no_amount], date("2025-07-01"));
        assert_eq!(stats.paid.count, 2);
        assert_eq!(stats.paid.total, dec!(95.50) + dec!(200) + dec!(10000));
    }
}

//! Coupon schedule domain models.
//!
//! A `CouponInstallment` is one scheduled payment for one investor
//! subscription on one due date, as served by the storage read view
//! (subscription, investor, project, and tranche attributes already joined).
//! Everything else in this module is a read-only projection recomputed on
//! every call; nothing derived is ever stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Persisted installment status. Everything richer is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    Pending,
    Paid,
}

impl InstallmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallmentStatus::Pending => "pending",
            InstallmentStatus::Paid => "paid",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "paid" => InstallmentStatus::Paid,
            _ => InstallmentStatus::Pending,
        }
    }
}

/// Status derived from `(persisted status, due date, today)`.
///
/// Never stored, to avoid staleness. The French labels are the wire
/// format the operator UI expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputedStatus {
    EnAttente,
    Paye,
    EnRetard,
}

/// One scheduled coupon payment, with denormalized join attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponInstallment {
    pub id: String,
    pub subscription_id: String,
    pub due_date: NaiveDate,
    pub gross_amount: Decimal,
    pub net_amount: Decimal,
    pub status: InstallmentStatus,
    pub paid_date: Option<NaiveDate>,
    pub paid_amount: Option<Decimal>,
    pub investor_id: String,
    pub investor_name: String,
    pub investor_type: String,
    pub investor_email: Option<String>,
    pub advisor_name: Option<String>,
    pub project_id: String,
    pub project_name: String,
    pub tranche_id: String,
    pub tranche_name: String,
    pub has_bank_details: bool,
    pub invested_amount: Decimal,
    /// True when this installment falls on the tranche maturity date; the
    /// payable total then includes full principal repayment.
    pub is_final: bool,
}

impl CouponInstallment {
    /// Net amount actually payable on this due date: the coupon, plus the
    /// invested principal when this is the final installment.
    pub fn payable_net(&self) -> Decimal {
        if self.is_final {
            self.net_amount + self.invested_amount
        } else {
            self.net_amount
        }
    }
}

/// Input model for generating installment rows (status defaults to pending).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCouponInstallment {
    pub subscription_id: String,
    pub due_date: NaiveDate,
    pub gross_amount: Decimal,
    pub net_amount: Decimal,
}

/// An installment enriched with its derived fields, as served to the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    #[serde(flatten)]
    pub installment: CouponInstallment,
    pub computed_status: ComputedStatus,
    /// Days until the due date; negative when overdue.
    pub days_remaining: i64,
}

/// Aggregate status of a group of installments sharing one due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateGroupStatus {
    AllPaid,
    Partial,
    AllLate,
    Mixed,
    AllPending,
}

/// Installments sharing the same due date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateGroup {
    pub due_date: NaiveDate,
    pub total_gross: Decimal,
    pub total_net: Decimal,
    /// Principal repaid on this date (sum over final installments).
    pub total_nominal: Decimal,
    pub paid_count: usize,
    pub total_count: usize,
    pub status: DateGroupStatus,
}

/// Date groups nested under one tranche, with tranche-level totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrancheGroup {
    pub tranche_id: String,
    pub tranche_name: String,
    pub total_gross: Decimal,
    pub total_net: Decimal,
    pub total_nominal: Decimal,
    pub paid_count: usize,
    pub total_count: usize,
    pub date_groups: Vec<DateGroup>,
}

/// Filter criteria for the schedule view. All fields optional, conjunctive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFilter {
    /// Case-insensitive substring, OR across investor/project/tranche names.
    pub search: Option<String>,
    pub statuses: Option<Vec<ComputedStatus>>,
    pub project_names: Option<Vec<String>>,
    pub tranche_names: Option<Vec<String>>,
    pub advisor_names: Option<Vec<String>>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Paginated, filtered schedule view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSearchResponse {
    pub items: Vec<ScheduleItem>,
    pub total_row_count: usize,
    pub total_pages: i64,
    pub page: i64,
    pub page_size: i64,
}

/// One dashboard bucket: distinct due dates and summed payable net.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardBucket {
    /// Number of distinct due dates with at least one installment in this
    /// bucket (the UI reports "N échéances", not "N coupons").
    pub count: usize,
    pub total: Decimal,
}

/// Dashboard statistics over the full installment snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub pending: DashboardBucket,
    pub paid: DashboardBucket,
    pub overdue: DashboardBucket,
}

//! Tranche domain models.
//!
//! A tranche is a sub-issuance of bonds within a project, carrying its own
//! rate, coupon frequency, and maturity.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponFrequency {
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
}

impl CouponFrequency {
    /// Number of coupon periods per year.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CouponFrequency::Annual => 1,
            CouponFrequency::SemiAnnual => 2,
            CouponFrequency::Quarterly => 4,
            CouponFrequency::Monthly => 12,
        }
    }

    pub fn months_per_period(&self) -> u32 {
        12 / self.periods_per_year()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CouponFrequency::Annual => "annual",
            CouponFrequency::SemiAnnual => "semi_annual",
            CouponFrequency::Quarterly => "quarterly",
            CouponFrequency::Monthly => "monthly",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "semi_annual" => CouponFrequency::SemiAnnual,
            "quarterly" => CouponFrequency::Quarterly,
            "monthly" => CouponFrequency::Monthly,
            _ => CouponFrequency::Annual,
        }
    }
}

/// Domain model representing a tranche
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tranche {
    pub id: String,
    pub project_id: String,
    pub name: String,
    /// Annual interest rate as a fraction, e.g. 0.08 for 8%.
    pub annual_rate: Decimal,
    pub frequency: CouponFrequency,
    pub issue_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Tranche {
    /// Coupon due dates: issue date stepped by the coupon period, up to and
    /// including the maturity date (which is always emitted last, even when
    /// the step does not land on it exactly).
    pub fn coupon_dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let step = self.frequency.months_per_period();
        let mut months = step;
        loop {
            let next = add_months(self.issue_date, months);
            if next >= self.maturity_date {
                dates.push(self.maturity_date);
                break;
            }
            dates.push(next);
            months += step;
        }
        dates
    }
}

/// Adds calendar months, clamping the day to the target month's end
/// (Jan 31 + 1 month = Feb 28/29).
pub(crate) fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = date.month0() + months;
    let year = date.year() + (zero_based / 12) as i32;
    let month = zero_based % 12 + 1;
    let day = date.day();
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 30))
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 29))
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 28))
        .unwrap_or(date)
}

/// Input model for creating a new tranche
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTranche {
    pub id: Option<String>,
    pub project_id: String,
    pub name: String,
    pub annual_rate: Decimal,
    pub frequency: CouponFrequency,
    pub issue_date: NaiveDate,
    pub maturity_date: NaiveDate,
}

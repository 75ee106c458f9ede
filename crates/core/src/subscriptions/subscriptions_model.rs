//! Subscription domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model representing an investor's subscription to a tranche
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub investor_id: String,
    pub tranche_id: String,
    pub invested_amount: Decimal,
    pub subscription_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new subscription
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub id: Option<String>,
    pub investor_id: String,
    pub tranche_id: String,
    pub invested_amount: Decimal,
    pub subscription_date: NaiveDate,
}

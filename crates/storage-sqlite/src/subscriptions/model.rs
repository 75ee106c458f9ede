//! Database models for subscriptions.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use obligo_core::subscriptions::{NewSubscription, Subscription};

use crate::investors::InvestorDB;
use crate::tranches::TrancheDB;
use crate::utils::parse_decimal_tolerant;

/// Database model for subscriptions
#[derive(
    Queryable,
    Identifiable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(InvestorDB, foreign_key = investor_id))]
#[diesel(belongs_to(TrancheDB, foreign_key = tranche_id))]
#[diesel(table_name = crate::schema::subscriptions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDB {
    pub id: String,
    pub investor_id: String,
    pub tranche_id: String,
    pub invested_amount: String,
    pub subscription_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new subscription
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::subscriptions)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscriptionDB {
    pub id: Option<String>,
    pub investor_id: String,
    pub tranche_id: String,
    pub invested_amount: String,
    pub subscription_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<SubscriptionDB> for Subscription {
    fn from(db: SubscriptionDB) -> Self {
        Self {
            id: db.id,
            investor_id: db.investor_id,
            tranche_id: db.tranche_id,
            invested_amount: parse_decimal_tolerant(&db.invested_amount, "invested_amount"),
            subscription_date: db.subscription_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewSubscription> for NewSubscriptionDB {
    fn from(domain: NewSubscription) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: domain.id,
            investor_id: domain.investor_id,
            tranche_id: domain.tranche_id,
            invested_amount: domain.invested_amount.to_string(),
            subscription_date: domain.subscription_date,
            created_at: now,
            updated_at: now,
        }
    }
}

//! Database models for coupon installments and the joined schedule view.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use obligo_core::schedule::{CouponInstallment, InstallmentStatus, NewCouponInstallment};

use crate::subscriptions::SubscriptionDB;
use crate::utils::parse_decimal_tolerant;

/// Database model for installments. Amounts are stored as TEXT to keep
/// exact decimal values across round trips.
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
#[diesel(belongs_to(SubscriptionDB, foreign_key = subscription_id))]
#[diesel(table_name = crate::schema::installments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct InstallmentDB {
    pub id: String,
    pub subscription_id: String,
    pub due_date: NaiveDate,
    pub gross_amount: String,
    pub net_amount: String,
    pub status: String,
    pub paid_date: Option<NaiveDate>,
    pub paid_amount: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for generating installment rows
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::installments)]
#[serde(rename_all = "camelCase")]
pub struct NewInstallmentDB {
    pub id: Option<String>,
    pub subscription_id: String,
    pub due_date: NaiveDate,
    pub gross_amount: String,
    pub net_amount: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<NewCouponInstallment> for NewInstallmentDB {
    fn from(domain: NewCouponInstallment) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: None,
            subscription_id: domain.subscription_id,
            due_date: domain.due_date,
            gross_amount: domain.gross_amount.to_string(),
            net_amount: domain.net_amount.to_string(),
            status: InstallmentStatus::Pending.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// One row of the joined schedule view: an installment together with the
/// subscription, investor, tranche, and project attributes the aggregator
/// needs. Loaded through an explicit `select` tuple, never stored.
#[derive(Queryable, Debug, Clone)]
pub struct ScheduleRowDB {
    pub id: String,
    pub subscription_id: String,
    pub due_date: NaiveDate,
    pub gross_amount: String,
    pub net_amount: String,
    pub status: String,
    pub paid_date: Option<NaiveDate>,
    pub paid_amount: Option<String>,
    pub invested_amount: String,
    pub investor_id: String,
    pub investor_name: String,
    pub investor_kind: String,
    pub investor_email: Option<String>,
    pub advisor_name: Option<String>,
    pub has_bank_details: bool,
    pub project_id: String,
    pub project_name: String,
    pub tranche_id: String,
    pub tranche_name: String,
    pub maturity_date: NaiveDate,
}

impl From<ScheduleRowDB> for CouponInstallment {
    fn from(db: ScheduleRowDB) -> Self {
        let is_final = db.due_date == db.maturity_date;
        Self {
            id: db.id,
            subscription_id: db.subscription_id,
            due_date: db.due_date,
            gross_amount: parse_decimal_tolerant(&db.gross_amount, "gross_amount"),
            net_amount: parse_decimal_tolerant(&db.net_amount, "net_amount"),
            status: InstallmentStatus::parse(&db.status),
            paid_date: db.paid_date,
            paid_amount: db
                .paid_amount
                .as_deref()
                .map(|s| parse_decimal_tolerant(s, "paid_amount")),
            investor_id: db.investor_id,
            investor_name: db.investor_name,
            investor_type: db.investor_kind,
            investor_email: db.investor_email,
            advisor_name: db.advisor_name,
            project_id: db.project_id,
            project_name: db.project_name,
            tranche_id: db.tranche_id,
            tranche_name: db.tranche_name,
            has_bank_details: db.has_bank_details,
            invested_amount: parse_decimal_tolerant(&db.invested_amount, "invested_amount"),
            is_final,
        }
    }
}

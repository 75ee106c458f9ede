//! Database models for investors.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use obligo_core::investors::{Investor, InvestorKind, NewInvestor};

/// Database model for investors
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::investors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct InvestorDB {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub email: Option<String>,
    pub advisor_name: Option<String>,
    pub has_bank_details: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new investor
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::investors)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestorDB {
    pub id: Option<String>,
    pub name: String,
    pub kind: String,
    pub email: Option<String>,
    pub advisor_name: Option<String>,
    pub has_bank_details: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<InvestorDB> for Investor {
    fn from(db: InvestorDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            kind: InvestorKind::parse(&db.kind),
            email: db.email,
            advisor_name: db.advisor_name,
            has_bank_details: db.has_bank_details,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewInvestor> for NewInvestorDB {
    fn from(domain: NewInvestor) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: domain.id,
            name: domain.name,
            kind: domain.kind.as_str().to_string(),
            email: domain.email,
            advisor_name: domain.advisor_name,
            has_bank_details: domain.has_bank_details,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Investor> for InvestorDB {
    fn from(domain: Investor) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            kind: domain.kind.as_str().to_string(),
            email: domain.email,
            advisor_name: domain.advisor_name,
            has_bank_details: domain.has_bank_details,
            created_at: domain.created_at,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

//! Database models for tranches.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use obligo_core::tranches::{CouponFrequency, NewTranche, Tranche};

use crate::projects::ProjectDB;
use crate::utils::parse_decimal_tolerant;

/// Database model for tranches. `annual_rate` is stored as TEXT to keep
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
#[diesel(belongs_to(ProjectDB, foreign_key = project_id))]
#[diesel(table_name = crate::schema::tranches)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TrancheDB {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub annual_rate: String,
    pub frequency: String,
    pub issue_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new tranche
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::tranches)]
#[serde(rename_all = "camelCase")]
pub struct NewTrancheDB {
    pub id: Option<String>,
    pub project_id: String,
    pub name: String,
    pub annual_rate: String,
    pub frequency: String,
    pub issue_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<TrancheDB> for Tranche {
    fn from(db: TrancheDB) -> Self {
        Self {
            id: db.id,
            project_id: db.project_id,
            name: db.name,
            annual_rate: parse_decimal_tolerant(&db.annual_rate, "annual_rate"),
            frequency: CouponFrequency::parse(&db.frequency),
            issue_date: db.issue_date,
            maturity_date: db.maturity_date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewTranche> for NewTrancheDB {
    fn from(domain: NewTranche) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: domain.id,
            project_id: domain.project_id,
            name: domain.name,
            annual_rate: domain.annual_rate.to_string(),
            frequency: domain.frequency.as_str().to_string(),
            issue_date: domain.issue_date,
            maturity_date: domain.maturity_date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Tranche> for TrancheDB {
    fn from(domain: Tranche) -> Self {
        Self {
            id: domain.id,
            project_id: domain.project_id,
            name: domain.name,
            annual_rate: domain.annual_rate.to_string(),
            frequency: domain.frequency.as_str().to_string(),
            issue_date: domain.issue_date,
            maturity_date: domain.maturity_date,
            created_at: domain.created_at,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

//! Investor domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestorKind {
    Individual,
    Company,
}

impl InvestorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestorKind::Individual => "individual",
            InvestorKind::Company => "company",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "company" => InvestorKind::Company,
            _ => InvestorKind::Individual,
        }
    }
}

/// Domain model representing an investor.
///
/// `advisor_name` is the CGP the investor goes through; `has_bank_details`
/// records whether a RIB is on file (payments need one).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investor {
    pub id: String,
    pub name: String,
    pub kind: InvestorKind,
    pub email: Option<String>,
    pub advisor_name: Option<String>,
    pub has_bank_details: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new investor
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestor {
    pub id: Option<String>,
    pub name: String,
    pub kind: InvestorKind,
    pub email: Option<String>,
    pub advisor_name: Option<String>,
    pub has_bank_details: bool,
}

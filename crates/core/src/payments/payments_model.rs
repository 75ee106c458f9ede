//! Payment and proof-document domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded coupon payment for one installment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub installment_id: String,
    pub paid_date: NaiveDate,
    pub amount: Decimal,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a payment
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub id: Option<String>,
    pub installment_id: String,
    pub paid_date: NaiveDate,
    pub amount: Decimal,
    pub note: Option<String>,
}

/// A proof document attached to a payment. The binary lives in the proof
/// store under `storage_key`; this row is the index entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProofDocument {
    pub id: String,
    pub payment_id: String,
    pub file_name: String,
    pub storage_key: String,
    pub uploaded_at: NaiveDateTime,
}

/// Input model for attaching a proof document
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewProofDocument {
    pub payment_id: String,
    pub file_name: String,
    pub storage_key: String,
}

/// Outcome of a bulk payment operation: processing continues past
/// individual failures, then reports the tally.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkPaymentOutcome {
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<BulkPaymentError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkPaymentError {
    pub installment_id: String,
    pub message: String,
}

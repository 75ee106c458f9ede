//! Database models for payments and proof documents.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use obligo_core::payments::{NewPayment, NewProofDocument, Payment, ProofDocument};

use crate::schedule::InstallmentDB;
use crate::utils::parse_decimal_tolerant;

/// Database model for payments
#[derive(
    Queryable, Identifiable, Associations, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(belongs_to(InstallmentDB, foreign_key = installment_id))]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PaymentDB {
    pub id: String,
    pub installment_id: String,
    pub paid_date: NaiveDate,
    pub amount: String,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Database model for recording a payment
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::payments)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentDB {
    pub id: Option<String>,
    pub installment_id: String,
    pub paid_date: NaiveDate,
    pub amount: String,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Database model for proof documents
#[derive(
    Queryable, Identifiable, Associations, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(belongs_to(PaymentDB, foreign_key = payment_id))]
#[diesel(table_name = crate::schema::proof_documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ProofDocumentDB {
    pub id: String,
    pub payment_id: String,
    pub file_name: String,
    pub storage_key: String,
    pub uploaded_at: NaiveDateTime,
}

/// Database model for attaching a proof document
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::proof_documents)]
#[serde(rename_all = "camelCase")]
pub struct NewProofDocumentDB {
    pub id: Option<String>,
    pub payment_id: String,
    pub file_name: String,
    pub storage_key: String,
    pub uploaded_at: NaiveDateTime,
}

// Conversion to domain models
impl From<PaymentDB> for Payment {
    fn from(db: PaymentDB) -> Self {
        Self {
            id: db.id,
            installment_id: db.installment_id,
            paid_date: db.paid_date,
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            note: db.note,
            created_at: db.created_at,
        }
    }
}

impl From<NewPayment> for NewPaymentDB {
    fn from(domain: NewPayment) -> Self {
        Self {
            id: domain.id,
            installment_id: domain.installment_id,
            paid_date: domain.paid_date,
            amount: domain.amount.to_string(),
            note: domain.note,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl From<ProofDocumentDB> for ProofDocument {
    fn from(db: ProofDocumentDB) -> Self {
        Self {
            id: db.id,
            payment_id: db.payment_id,
            file_name: db.file_name,
            storage_key: db.storage_key,
            uploaded_at: db.uploaded_at,
        }
    }
}

impl From<NewProofDocument> for NewProofDocumentDB {
    fn from(domain: NewProofDocument) -> Self {
        Self {
            id: None,
            payment_id: domain.payment_id,
            file_name: domain.file_name,
            storage_key: domain.storage_key,
            uploaded_at: Utc::now().naive_utc(),
        }
    }
}

//! Reminder domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One composed reminder draft, ready for the email-draft collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDraft {
    pub investor_id: String,
    pub investor_name: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub installment_count: usize,
    pub total_net: Decimal,
}

/// Tally of a reminder run. Investors without an email address are skipped,
/// failed submissions are counted and reported, processing never aborts on
/// the first error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderOutcome {
    pub drafts_created: usize,
    pub skipped_no_email: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

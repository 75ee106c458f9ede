//! Reminders module - overdue coupon reminder drafts.

mod reminders_client;
mod reminders_model;
mod reminders_service;

pub use reminders_client::{EmailDraftClient, EmailDraftClientTrait, ReminderError};
pub use reminders_model::{ReminderDraft, ReminderOutcome};
pub use reminders_service::{ReminderService, ReminderServiceTrait};

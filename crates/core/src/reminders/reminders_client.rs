//! HTTP client for the authenticated email-draft collaborator.
//!
//! The draft service is an opaque collaborator: one POST per draft, bearer
//! token auth, JSON request/response. Its internals are out of scope.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::errors::Result;

/// Reminder-specific failure modes.
#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("Email draft request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Email draft service rejected the draft (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Trait for the email-draft collaborator.
#[async_trait]
pub trait EmailDraftClientTrait: Send + Sync {
    async fn create_draft(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

#[derive(Serialize)]
struct DraftRequest<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

pub struct EmailDraftClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl EmailDraftClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        EmailDraftClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl EmailDraftClientTrait for EmailDraftClient {
    async fn create_draft(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/drafts", self.base_url))
            .bearer_auth(&self.token)
            .json(&DraftRequest { to, subject, body })
            .send()
            .await
            .map_err(ReminderError::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ReminderError::Rejected { status, message }.into());
        }
        Ok(())
    }
}

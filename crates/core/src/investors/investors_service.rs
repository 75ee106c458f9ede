use std::sync::Arc;

use crate::errors::{Result, ValidationError};
use crate::investors::investors_model::{Investor, NewInvestor};
use crate::investors::investors_traits::{InvestorRepositoryTrait, InvestorServiceTrait};
use async_trait::async_trait;

pub struct InvestorService {
    repository: Arc<dyn InvestorRepositoryTrait>,
}

impl InvestorService {
    pub fn new(repository: Arc<dyn InvestorRepositoryTrait>) -> Self {
        InvestorService { repository }
    }

    fn validate(name: &str, email: Option<&str>) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if let Some(email) = email {
            if !email.contains('@') {
                return Err(ValidationError::InvalidInput(format!(
                    "invalid email address: {email}"
                ))
                .into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl InvestorServiceTrait for InvestorService {
    fn get_investors(&self) -> Result<Vec<Investor>> {
        self.repository.load_investors()
    }

    fn get_investor(&self, investor_id: &str) -> Result<Investor> {
        self.repository.get_investor(investor_id)
    }

    async fn create_investor(&self, new_investor: NewInvestor) -> Result<Investor> {
        Self::validate(&new_investor.name, new_investor.email.as_deref())?;
        self.repository.insert_new_investor(new_investor).await
    }

    async fn update_investor(&self, updated_investor_data: Investor) -> Result<Investor> {
        Self::validate(
            &updated_investor_data.name,
            updated_investor_data.email.as_deref(),
        )?;
        self.repository.update_investor(updated_investor_data).await
    }

    async fn delete_investor(&self, investor_id_to_delete: String) -> Result<usize> {
        self.repository.delete_investor(investor_id_to_delete).await
    }
}

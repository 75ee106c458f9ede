use std::sync::Arc;

use rust_decimal::Decimal;

use crate::errors::{Result, ValidationError};
use crate::tranches::tranches_model::{NewTranche, Tranche};
use crate::tranches::tranches_traits::{TrancheRepositoryTrait, TrancheServiceTrait};
use async_trait::async_trait;

pub struct TrancheService {
    repository: Arc<dyn TrancheRepositoryTrait>,
}

impl TrancheService {
    pub fn new(repository: Arc<dyn TrancheRepositoryTrait>) -> Self {
        TrancheService { repository }
    }

    fn validate(
        name: &str,
        annual_rate: Decimal,
        issue_date: chrono::NaiveDate,
        maturity_date: chrono::NaiveDate,
    ) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if annual_rate <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "annual rate must be positive".to_string(),
            )
            .into());
        }
        if maturity_date <= issue_date {
            return Err(ValidationError::InvalidInput(
                "maturity date must be after the issue date".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl TrancheServiceTrait for TrancheService {
    fn get_tranches(&self) -> Result<Vec<Tranche>> {
        self.repository.load_tranches()
    }

    fn get_tranches_for_project(&self, project_id: &str) -> Result<Vec<Tranche>> {
        self.repository.load_tranches_for_project(project_id)
    }

    fn get_tranche(&self, tranche_id: &str) -> Result<Tranche> {
        self.repository.get_tranche(tranche_id)
    }

    async fn create_tranche(&self, new_tranche: NewTranche) -> Result<Tranche> {
        Self::validate(
            &new_tranche.name,
            new_tranche.annual_rate,
            new_tranche.issue_date,
            new_tranche.maturity_date,
        )?;
        self.repository.insert_new_tranche(new_tranche).await
    }

    async fn update_tranche(&self, updated_tranche_data: Tranche) -> Result<Tranche> {
        Self::validate(
            &updated_tranche_data.name,
            updated_tranche_data.annual_rate,
            updated_tranche_data.issue_date,
            updated_tranche_data.maturity_date,
        )?;
        self.repository.update_tranche(updated_tranche_data).await
    }

    async fn delete_tranche(&self, tranche_id_to_delete: String) -> Result<usize> {
        self.repository.delete_tranche(tranche_id_to_delete).await
    }
}

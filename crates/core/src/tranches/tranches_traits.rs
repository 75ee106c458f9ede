use crate::errors::Result;
use crate::tranches::tranches_model::{NewTranche, Tranche};
use async_trait::async_trait;

/// Trait for tranche repository operations
#[async_trait]
pub trait TrancheRepositoryTrait: Send + Sync {
    fn load_tranches(&self) -> Result<Vec<Tranche>>;
    fn load_tranches_for_project(&self, project_id: &str) -> Result<Vec<Tranche>>;
    fn get_tranche(&self, tranche_id: &str) -> Result<Tranche>;
    async fn insert_new_tranche(&self, new_tranche: NewTranche) -> Result<Tranche>;
    async fn update_tranche(&self, tranche_update: Tranche) -> Result<Tranche>;
    async fn delete_tranche(&self, tranche_id_to_delete: String) -> Result<usize>;
}

/// Trait for tranche service operations
#[async_trait]
pub trait TrancheServiceTrait: Send + Sync {
    fn get_tranches(&self) -> Result<Vec<Tranche>>;
    fn get_tranches_for_project(&self, project_id: &str) -> Result<Vec<Tranche>>;
    fn get_tranche(&self, tranche_id: &str) -> Result<Tranche>;
    async fn create_tranche(&self, new_tranche: NewTranche) -> Result<Tranche>;
    async fn update_tranche(&self, updated_tranche_data: Tranche) -> Result<Tranche>;
    async fn delete_tranche(&self, tranche_id_to_delete: String) -> Result<usize>;
}

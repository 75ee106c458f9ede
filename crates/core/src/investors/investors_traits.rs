use crate::errors::Result;
use crate::investors::investors_model::{Investor, NewInvestor};
use async_trait::async_trait;

/// Trait for investor repository operations
#[async_trait]
pub trait InvestorRepositoryTrait: Send + Sync {
    fn load_investors(&self) -> Result<Vec<Investor>>;
    fn get_investor(&self, investor_id: &str) -> Result<Investor>;
    async fn insert_new_investor(&self, new_investor: NewInvestor) -> Result<Investor>;
    async fn update_investor(&self, investor_update: Investor) -> Result<Investor>;
    async fn delete_investor(&self, investor_id_to_delete: String) -> Result<usize>;
}

/// Trait for investor service operations
#[async_trait]
pub trait InvestorServiceTrait: Send + Sync {
    fn get_investors(&self) -> Result<Vec<Investor>>;
    fn get_investor(&self, investor_id: &str) -> Result<Investor>;
    async fn create_investor(&self, new_investor: NewInvestor) -> Result<Investor>;
    async fn update_investor(&self, updated_investor_data: Investor) -> Result<Investor>;
    async fn delete_investor(&self, investor_id_to_delete: String) -> Result<usize>;
}

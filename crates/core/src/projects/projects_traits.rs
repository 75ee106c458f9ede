use crate::errors::Result;
use crate::projects::projects_model::{NewProject, Project};
use async_trait::async_trait;

/// Trait for project repository operations
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    fn load_projects(&self) -> Result<Vec<Project>>;
    fn get_project(&self, project_id: &str) -> Result<Project>;
    async fn insert_new_project(&self, new_project: NewProject) -> Result<Project>;
    async fn update_project(&self, project_update: Project) -> Result<Project>;
    async fn delete_project(&self, project_id_to_delete: String) -> Result<usize>;
}

/// Trait for project service operations
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    fn get_projects(&self) -> Result<Vec<Project>>;
    fn get_project(&self, project_id: &str) -> Result<Project>;
    async fn create_project(&self, new_project: NewProject) -> Result<Project>;
    async fn update_project(&self, updated_project_data: Project) -> Result<Project>;
    async fn delete_project(&self, project_id_to_delete: String) -> Result<usize>;
}

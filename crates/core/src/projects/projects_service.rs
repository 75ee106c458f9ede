use std::sync::Arc;

use crate::errors::{Result, ValidationError};
use crate::projects::projects_model::{NewProject, Project};
use crate::projects::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use async_trait::async_trait;

pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
}

impl ProjectService {
    pub fn new(repository: Arc<dyn ProjectRepositoryTrait>) -> Self {
        ProjectService { repository }
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl ProjectServiceTrait for ProjectService {
    fn get_projects(&self) -> Result<Vec<Project>> {
        self.repository.load_projects()
    }

    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.repository.get_project(project_id)
    }

    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        Self::validate_name(&new_project.name)?;
        self.repository.insert_new_project(new_project).await
    }

    async fn update_project(&self, updated_project_data: Project) -> Result<Project> {
        Self::validate_name(&updated_project_data.name)?;
        self.repository.update_project(updated_project_data).await
    }

    async fn delete_project(&self, project_id_to_delete: String) -> Result<usize> {
        self.repository.delete_project(project_id_to_delete).await
    }
}

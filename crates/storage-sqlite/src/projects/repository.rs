use obligo_core::projects::{NewProject, Project, ProjectRepositoryTrait};
use obligo_core::Result;

use super::model::{NewProjectDB, ProjectDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::projects;
use crate::schema::projects::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct ProjectRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ProjectRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ProjectRepository { pool, writer }
    }

    pub fn load_projects_impl(&self) -> Result<Vec<Project>> {
        let mut conn = get_connection(&self.pool)?;
        let projects_db = projects
            .order(name.asc())
            .load::<ProjectDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(projects_db.into_iter().map(Project::from).collect())
    }

    pub fn get_project_impl(&self, project_id: &str) -> Result<Project> {
        let mut conn = get_connection(&self.pool)?;
        let project_db = projects
            .find(project_id)
            .first::<ProjectDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Project::from(project_db))
    }
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    fn load_projects(&self) -> Result<Vec<Project>> {
        self.load_projects_impl()
    }

    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.get_project_impl(project_id)
    }

    async fn insert_new_project(&self, new_project: NewProject) -> Result<Project> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let mut new_project_db: NewProjectDB = new_project.into();
                new_project_db
                    .id
                    .get_or_insert_with(|| Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(projects::table)
                    .values(&new_project_db)
                    .returning(ProjectDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Project::from(result_db))
            })
            .await
    }

    async fn update_project(&self, project_update: Project) -> Result<Project> {
        let project_id_owned = project_update.id.clone();
        let project_db: ProjectDB = project_update.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                diesel::update(projects.find(project_id_owned.clone()))
                    .set(&project_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = projects
                    .find(project_id_owned)
                    .first::<ProjectDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Project::from(result_db))
            })
            .await
    }

    async fn delete_project(&self, project_id_to_delete: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(projects.find(project_id_to_delete))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}

//! Database models for projects.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use obligo_core::projects::{NewProject, Project, ProjectStatus};

/// Database model for projects
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ProjectDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new project
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::projects)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectDB {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<ProjectDB> for Project {
    fn from(db: ProjectDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            status: ProjectStatus::parse(&db.status),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewProject> for NewProjectDB {
    fn from(domain: NewProject) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: domain.id,
            name: domain.name,
            description: domain.description,
            status: domain.status.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Project> for ProjectDB {
    fn from(domain: Project) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            description: domain.description,
            status: domain.status.as_str().to_string(),
            created_at: domain.created_at,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

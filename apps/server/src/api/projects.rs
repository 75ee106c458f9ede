use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use obligo_core::projects::{NewProject, Project};

async fn get_projects(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Project>>> {
    let projects = state.project_service.get_projects()?;
    Ok(Json(projects))
}

async fn get_project(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Project>> {
    let project = state.project_service.get_project(&id)?;
    Ok(Json(project))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(project): Json<NewProject>,
) -> ApiResult<Json<Project>> {
    let p = state.project_service.create_project(project).await?;
    Ok(Json(p))
}

async fn update_project(
    State(state): State<Arc<AppState>>,
    Json(project): Json<Project>,
) -> ApiResult<Json<Project>> {
    let p = state.project_service.update_project(project).await?;
    Ok(Json(p))
}

async fn delete_project(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.project_service.delete_project(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/projects",
            get(get_projects).post(create_project).put(update_project),
        )
        .route("/projects/{id}", get(get_project).delete(delete_project))
}

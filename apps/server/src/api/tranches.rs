use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use obligo_core::tranches::{NewTranche, Tranche};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrancheListQuery {
    project_id: Option<String>,
}

async fn get_tranches(
    Query(query): Query<TrancheListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Tranche>>> {
    let tranches = match query.project_id {
        Some(project_id) => state.tranche_service.get_tranches_for_project(&project_id)?,
        None => state.tranche_service.get_tranches()?,
    };
    Ok(Json(tranches))
}

async fn get_tranche(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Tranche>> {
    let tranche = state.tranche_service.get_tranche(&id)?;
    Ok(Json(tranche))
}

async fn create_tranche(
    State(state): State<Arc<AppState>>,
    Json(tranche): Json<NewTranche>,
) -> ApiResult<Json<Tranche>> {
    let t = state.tranche_service.create_tranche(tranche).await?;
    Ok(Json(t))
}

async fn update_tranche(
    State(state): State<Arc<AppState>>,
    Json(tranche): Json<Tranche>,
) -> ApiResult<Json<Tranche>> {
    let t = state.tranche_service.update_tranche(tranche).await?;
    Ok(Json(t))
}

async fn delete_tranche(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.tranche_service.delete_tranche(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/tranches",
            get(get_tranches).post(create_tranche).put(update_tranche),
        )
        .route("/tranches/{id}", get(get_tranche).delete(delete_tranche))
}

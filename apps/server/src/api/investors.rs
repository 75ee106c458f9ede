use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use obligo_core::investors::{Investor, NewInvestor};

async fn get_investors(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Investor>>> {
    let investors = state.investor_service.get_investors()?;
    Ok(Json(investors))
}

async fn get_investor(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Investor>> {
    let investor = state.investor_service.get_investor(&id)?;
    Ok(Json(investor))
}

async fn create_investor(
    State(state): State<Arc<AppState>>,
    Json(investor): Json<NewInvestor>,
) -> ApiResult<Json<Investor>> {
    let i = state.investor_service.create_investor(investor).await?;
    Ok(Json(i))
}

async fn update_investor(
    State(state): State<Arc<AppState>>,
    Json(investor): Json<Investor>,
) -> ApiResult<Json<Investor>> {
    let i = state.investor_service.update_investor(investor).await?;
    Ok(Json(i))
}

async fn delete_investor(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.investor_service.delete_investor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/investors",
            get(get_investors)
                .post(create_investor)
                .put(update_investor),
        )
        .route("/investors/{id}", get(get_investor).delete(delete_investor))
}

use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use obligo_core::subscriptions::{NewSubscription, Subscription};

async fn get_subscriptions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Subscription>>> {
    let subscriptions = state.subscription_service.get_subscriptions()?;
    Ok(Json(subscriptions))
}

async fn get_subscription(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Subscription>> {
    let subscription = state.subscription_service.get_subscription(&id)?;
    Ok(Json(subscription))
}

/// Creating a subscription also generates its coupon installment rows,
/// committed together with the subscription.
async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Json(subscription): Json<NewSubscription>,
) -> ApiResult<Json<Subscription>> {
    let s = state
        .subscription_service
        .create_subscription(subscription)
        .await?;
    Ok(Json(s))
}

async fn delete_subscription(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.subscription_service.delete_subscription(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/subscriptions",
            get(get_subscriptions).post(create_subscription),
        )
        .route(
            "/subscriptions/{id}",
            get(get_subscription).delete(delete_subscription),
        )
}

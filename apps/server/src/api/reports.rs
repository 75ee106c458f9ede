use std::sync::Arc;

use crate::{api::shared::resolve_today, error::ApiResult, main_lib::AppState};
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    routing::post,
    Json, Router,
};
use obligo_core::constants::MAX_SCHEDULE_ROWS;
use obligo_core::reports::schedule_csv;
use obligo_core::schedule::ScheduleFilter;
use serde::Deserialize;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ReportBody {
    #[serde(flatten)]
    criteria: ScheduleFilter,
    as_of: Option<String>,
}

/// CSV export of the filtered installment set (unpaginated).
async fn export_schedule_csv(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReportBody>,
) -> ApiResult<(HeaderMap, Vec<u8>)> {
    let today = resolve_today(body.as_of)?;
    let response = state
        .schedule_service
        .search(body.criteria, 1, MAX_SCHEDULE_ROWS, today)?;
    let csv = schedule_csv(&response.items)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"schedule.csv\""),
    );
    Ok((headers, csv))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/reports/schedule.csv", post(export_schedule_csv))
}

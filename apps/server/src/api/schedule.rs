use std::sync::Arc;

use crate::{
    api::shared::{parse_date, resolve_today},
    error::ApiResult,
    main_lib::AppState,
};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use obligo_core::constants::DEFAULT_PAGE_SIZE;
use obligo_core::schedule::{
    DashboardStats, DateGroup, ScheduleFilter, ScheduleSearchResponse, TrancheGroup,
};
use serde::Deserialize;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ScheduleSearchBody {
    #[serde(flatten)]
    criteria: ScheduleFilter,
    page: Option<i64>,
    page_size: Option<i64>,
    /// Reference date for derived statuses; defaults to the current date.
    as_of: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GroupQuery {
    search: Option<String>,
    date_from: Option<String>,
    date_to: Option<String>,
    as_of: Option<String>,
}

impl GroupQuery {
    fn into_parts(self) -> ApiResult<(ScheduleFilter, chrono::NaiveDate)> {
        let today = resolve_today(self.as_of)?;
        let criteria = ScheduleFilter {
            search: self.search,
            date_from: self.date_from.as_deref().map(parse_date).transpose()?,
            date_to: self.date_to.as_deref().map(parse_date).transpose()?,
            ..Default::default()
        };
        Ok((criteria, today))
    }
}

async fn search_schedule(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScheduleSearchBody>,
) -> ApiResult<Json<ScheduleSearchResponse>> {
    let today = resolve_today(body.as_of)?;
    let response = state.schedule_service.search(
        body.criteria,
        body.page.unwrap_or(1),
        body.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        today,
    )?;
    Ok(Json(response))
}

async fn schedule_by_date(
    Query(query): Query<GroupQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<DateGroup>>> {
    let (criteria, today) = query.into_parts()?;
    let groups = state.schedule_service.grouped_by_date(criteria, today)?;
    Ok(Json(groups))
}

async fn schedule_by_tranche(
    Query(query): Query<GroupQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TrancheGroup>>> {
    let (criteria, today) = query.into_parts()?;
    let groups = state.schedule_service.grouped_by_tranche(criteria, today)?;
    Ok(Json(groups))
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct StatsQuery {
    as_of: Option<String>,
}

async fn schedule_stats(
    Query(query): Query<StatsQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DashboardStats>> {
    let today = resolve_today(query.as_of)?;
    let stats = state.schedule_service.dashboard_stats(today)?;
    Ok(Json(stats))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/schedule/search", post(search_schedule))
        .route("/schedule/by-date", get(schedule_by_date))
        .route("/schedule/by-tranche", get(schedule_by_tranche))
        .route("/schedule/stats", get(schedule_stats))
}

use std::sync::Arc;

use crate::{api::shared::resolve_today, error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::post, Json, Router};
use obligo_core::reminders::ReminderOutcome;
use serde::Deserialize;

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RemindersBody {
    as_of: Option<String>,
}

/// Composes one email draft per investor with overdue installments and
/// submits them to the draft service. Returns the tally.
async fn send_overdue_reminders(
    State(state): State<Arc<AppState>>,
    body: Option<Json<RemindersBody>>,
) -> ApiResult<Json<ReminderOutcome>> {
    let today = resolve_today(body.and_then(|Json(b)| b.as_of))?;
    let outcome = state.reminder_service.send_overdue_reminders(today).await?;
    Ok(Json(outcome))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/reminders/overdue", post(send_overdue_reminders))
}

use std::sync::Arc;

use crate::{
    api::shared::parse_date,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use obligo_core::payments::{BulkPaymentOutcome, NewPayment, Payment, ProofDocument};
use serde::Deserialize;

async fn get_payment_for_installment(
    Path(installment_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Payment>> {
    let payment = state
        .payment_service
        .get_payment_for_installment(&installment_id)?;
    Ok(Json(payment))
}

async fn record_payment(
    State(state): State<Arc<AppState>>,
    Json(payment): Json<NewPayment>,
) -> ApiResult<Json<Payment>> {
    let p = state.payment_service.record_payment(payment).await?;
    Ok(Json(p))
}

async fn record_payments_bulk(
    State(state): State<Arc<AppState>>,
    Json(payments): Json<Vec<NewPayment>>,
) -> ApiResult<Json<BulkPaymentOutcome>> {
    let outcome = state.payment_service.record_payments_bulk(payments).await?;
    Ok(Json(outcome))
}

async fn unmark_payment(
    Path(installment_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.payment_service.unmark_payment(installment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnmarkGroupBody {
    due_date: String,
    tranche_id: Option<String>,
}

/// Unmarks every paid installment of one due date (optionally narrowed to a
/// tranche). Continue-on-error, returns the tally.
async fn unmark_date_group(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UnmarkGroupBody>,
) -> ApiResult<Json<BulkPaymentOutcome>> {
    let due_date = parse_date(&body.due_date)?;
    let outcome = state
        .payment_service
        .unmark_date_group(due_date, body.tranche_id)
        .await?;
    Ok(Json(outcome))
}

async fn list_proofs(
    Path(payment_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ProofDocument>>> {
    let proofs = state.payment_service.list_proofs(&payment_id)?;
    Ok(Json(proofs))
}

/// Multipart upload: the first file part becomes the proof document.
async fn attach_proof(
    Path(payment_id): Path<String>,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<ProofDocument>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
        let proof = state
            .payment_service
            .attach_proof(payment_id.clone(), file_name, content.to_vec())
            .await?;
        return Ok(Json(proof));
    }
    Err(ApiError::BadRequest("Missing file part".to_string()))
}

async fn remove_proof(
    Path(proof_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.payment_service.remove_proof(proof_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payments", post(record_payment))
        .route("/payments/bulk", post(record_payments_bulk))
        .route("/payments/unmark-group", post(unmark_date_group))
        .route(
            "/payments/installment/{id}",
            get(get_payment_for_installment).delete(unmark_payment),
        )
        .route("/payments/{id}/proofs", get(list_proofs).post(attach_proof))
        .route("/payments/proofs/{id}", delete(remove_proof))
}

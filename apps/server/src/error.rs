use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use obligo_core::errors::{DatabaseError, Error as CoreError};
use obligo_core::payments::PaymentError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    // Surface the underlying error message to help debugging during development
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => (core_status(e), e.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        let body = Json(ErrorBody { error: msg });
        (status, body).into_response()
    }
}

fn core_status(e: &CoreError) -> StatusCode {
    match e {
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Database(DatabaseError::UniqueViolation(_))
        | CoreError::Database(DatabaseError::ForeignKeyViolation(_)) => StatusCode::CONFLICT,
        CoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Payment(PaymentError::AlreadyPaid(_)) => StatusCode::CONFLICT,
        CoreError::Payment(PaymentError::NoPaymentRecorded(_)) => StatusCode::NOT_FOUND,
        CoreError::Payment(PaymentError::InvalidAmount(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use obligo_core::errors::ValidationError;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::Core(CoreError::Database(DatabaseError::NotFound(
            "Record not found".into(),
        )));
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_422() {
        let err = ApiError::Core(CoreError::Validation(ValidationError::InvalidInput(
            "name must not be empty".into(),
        )));
        assert_eq!(status_of(err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn constraint_violations_map_to_409() {
        let unique = ApiError::Core(CoreError::Database(DatabaseError::UniqueViolation(
            "payments.installment_id".into(),
        )));
        assert_eq!(status_of(unique), StatusCode::CONFLICT);
        let already_paid =
            ApiError::Core(CoreError::Payment(PaymentError::AlreadyPaid("i1".into())));
        assert_eq!(status_of(already_paid), StatusCode::CONFLICT);
    }

    #[test]
    fn everything_else_maps_to_500() {
        let err = ApiError::Core(CoreError::Unexpected("boom".into()));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

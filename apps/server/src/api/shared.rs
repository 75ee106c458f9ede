use chrono::{NaiveDate, Utc};

use crate::error::{ApiError, ApiResult};

/// The reference date for derived statuses: an explicit `asOf` query/body
/// value when supplied (deterministic tests, backdated views), otherwise
/// the server's current UTC date.
pub fn resolve_today(as_of: Option<String>) -> ApiResult<NaiveDate> {
    match as_of {
        Some(raw) => parse_date(&raw),
        None => Ok(Utc::now().date_naive()),
    }
}

pub fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid date '{raw}', expected YYYY-MM-DD")))
}

//! # Error Handling Middleware
//!
//! Maps calendar errors to HTTP status codes and JSON error bodies, so every
//! endpoint reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use repairdesk_core::errors::CalendarError;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use repairdesk_api::middleware::error_handling::AppError;
/// use repairdesk_core::models::Slot;
///
/// async fn handler(time: String) -> Result<Json<Slot>, AppError> {
///     let slot: Slot = time.parse()?;
///     Ok(Json(slot))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CalendarError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CalendarError::NotFound(_) => StatusCode::NOT_FOUND,
            CalendarError::Validation(_)
            | CalendarError::InvalidTime(_)
            | CalendarError::InvalidSlot { .. }
            | CalendarError::SlotOutsideGrid { .. } => StatusCode::BAD_REQUEST,
            CalendarError::SlotTaken { .. } => StatusCode::CONFLICT,
            CalendarError::Database(_) | CalendarError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `CalendarResult` inside handlers
impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        AppError(err)
    }
}

/// Storage failures surface as `CalendarError::Database`
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CalendarError::Database(err))
    }
}

/// Maps a CalendarError to an HTTP response
pub fn map_error(err: CalendarError) -> Response {
    AppError(err).into_response()
}

//! Mapping from core errors to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use constrix_core::Error;
use serde::Serialize;
use tracing::error;

/// JSON error body: `{error, message}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Wrapper turning a core [`Error`] into an HTTP response
#[derive(Debug)]
pub struct ApiError(pub Error);

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self.0 {
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", msg),
            Error::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", msg),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, "Invalid request", msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "Unauthorized", msg),
            Error::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                "External service failure",
                msg,
            ),
            Error::Database(msg) => {
                // Internals stay in the log, not on the wire
                error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}

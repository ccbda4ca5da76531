//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use publink_core::download::DownloadError;
use publink_core::shortener::ShortUrlError;
use publink_shared::AppError;

/// Handler error rendered as `{ "error": <code>, "message": <text> }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side faults are logged by the services; keep details out of the body.
        let message = match &self.0 {
            AppError::Internal(_) | AppError::TransactionFailed(_) => {
                "An error occurred".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DownloadError> for ApiError {
    fn from(err: DownloadError) -> Self {
        Self(err.into())
    }
}

impl From<ShortUrlError> for ApiError {
    fn from(err: ShortUrlError) -> Self {
        Self(err.into())
    }
}

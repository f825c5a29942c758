//! Mapping of service errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use smsvault_common::Error;

/// Generic body for faults the caller cannot act on.
const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Error wrapper carrying the HTTP mapping for [`Error`].
///
/// Each failure cause keeps its own status instead of being collapsed into a
/// generic not-found: validation and lookup problems are the caller's (400),
/// credential problems are ours (503), provider faults are upstream (502),
/// and everything else is a 500 with the detail logged server-side only.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            Error::InvalidInput(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Error::UnsupportedProvider(name) => (
                StatusCode::BAD_REQUEST,
                format!("Unsupported provider: {}", name),
            ),
            Error::NotFound(_) => (StatusCode::BAD_REQUEST, "No SMS backup found.".to_string()),
            Error::Authentication(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The backup provider is currently unavailable. Please try again later."
                    .to_string(),
            ),
            Error::Network(_) => (
                StatusCode::BAD_GATEWAY,
                "Failed to reach the backup provider. Please try again later.".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UNEXPECTED_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Request rejected: {}", self.0);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;
use utoipa::ToSchema;

use crate::metrics::ERROR_RESPONSES_TOTAL;

/// Error response returned to callers when an operation fails.
///
/// Serializes to exactly two members, `message` and `status`. The status is
/// carried as an opaque integer: it usually mirrors the HTTP status line, but
/// no range is enforced on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    #[schema(example = "Resource not found")]
    message: String,
    /// Status code, conventionally the transport status
    #[schema(example = 404)]
    status: i32,
}

impl ErrorResponse {
    /// Create a new error response. Both values are stored as given.
    pub fn new(message: impl Into<String>, status: i32) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn into_parts(self) -> (String, i32) {
        (self.message, self.status)
    }

    /// HTTP status denoted by the embedded code, if it is a valid one
    pub fn status_code(&self) -> Option<StatusCode> {
        u16::try_from(self.status)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        // The body keeps the embedded status even when the line falls back to 500.
        let status = match self.status_code() {
            Some(code) if carries_body(code) => code,
            Some(code) => {
                warn!(
                    status = self.status,
                    "Error response status {} cannot carry a body, sending 500",
                    code
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
            None => {
                warn!(
                    status = self.status,
                    "Error response status is not a valid HTTP status, sending 500"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Labelled by the line sent, never by the caller-chosen code
        ERROR_RESPONSES_TOTAL
            .with_label_values(&[status.as_str()])
            .inc();

        (status, Json(self)).into_response()
    }
}

/// Whether HTTP allows a response body on this status line
fn carries_body(code: StatusCode) -> bool {
    !(code.is_informational()
        || code == StatusCode::NO_CONTENT
        || code == StatusCode::RESET_CONTENT
        || code == StatusCode::NOT_MODIFIED)
}

/// Helpers for the common HTTP failures
impl ErrorResponse {
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(message, i32::from(status.as_u16()))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::from_status(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::from_status(StatusCode::NOT_FOUND, message)
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::from_status(StatusCode::METHOD_NOT_ALLOWED, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::from_status(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::from_status(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

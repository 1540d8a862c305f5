//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use recordhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Status code and machine-readable code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Unauthenticated => (StatusCode::UNAUTHORIZED, "LOGIN_REQUIRED"),
        ErrorKind::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
        ErrorKind::SessionRevoked => (StatusCode::UNAUTHORIZED, "SESSION_REVOKED"),
        ErrorKind::SessionSuperseded => (StatusCode::UNAUTHORIZED, "SESSION_SUPERSEDED"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::IpLocked => (StatusCode::TOO_MANY_REQUESTS, "IP_LOCKED"),
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Cache | ErrorKind::ServiceUnavailable => {
            (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
        }
        ErrorKind::Serialization | ErrorKind::Configuration | ErrorKind::Internal => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = status_for(err.kind);

        if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.message, "Request failed");
        }

        // Backend detail stays in the log.
        let message = match err.kind {
            ErrorKind::Cache | ErrorKind::ServiceUnavailable => {
                "Service temporarily unavailable".to_string()
            }
            ErrorKind::Serialization | ErrorKind::Configuration | ErrorKind::Internal => {
                "Internal server error".to_string()
            }
            _ => err.message.clone(),
        };

        let retry_after = err
            .details
            .as_ref()
            .and_then(|d| d.get("retry_after_minutes"))
            .and_then(|v| v.as_i64());

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
            details: err.details,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(minutes) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&(minutes * 60).to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

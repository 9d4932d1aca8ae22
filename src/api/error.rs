//! Error envelope for the HTTP API
//!
//! Every failure is returned as
//! `{"error": {"message", "type", "code"[, "param"][, "trace"]}}`. Resolution
//! failures carry the resolution trace so clients can see which endpoints
//! were passed over.

use crate::registry::{ErrorKind, RegistryError};
use crate::routing::FallbackChainResult;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// API error response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Resolution trace, present on resolve failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<FallbackChainResult>,
}

impl ApiError {
    fn new(message: impl Into<String>, r#type: &str, code: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.into(),
                r#type: r#type.to_string(),
                param: None,
                code: Some(code.to_string()),
                trace: None,
            },
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, "invalid_request_error", "invalid_request_error")
    }

    /// Create a not found error (404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, "not_found_error", "not_found")
    }

    /// Create a service unavailable error (503).
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(message, "server_error", "service_unavailable")
    }

    /// Create an internal error (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message, "server_error", "internal_error")
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.error.param = Some(param.into());
        self
    }

    pub fn with_trace(mut self, trace: FallbackChainResult) -> Self {
        self.error.trace = Some(trace);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("invalid_request_error") => StatusCode::BAD_REQUEST,
            Some("not_found") => StatusCode::NOT_FOUND,
            Some("service_unavailable") => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        let message = err.to_string();
        let api_error = match err.kind() {
            ErrorKind::Validation => ApiError::bad_request(message),
            ErrorKind::NotFound => ApiError::not_found(message),
            ErrorKind::Unavailable => ApiError::service_unavailable(message),
            ErrorKind::Internal => ApiError::internal(message),
        };

        match err {
            RegistryError::Resolve(e) => api_error.with_trace(e.into_trace()),
            _ => api_error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

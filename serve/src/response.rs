//! Maps validation and explain failures to HTTP responses with an `{"error": ...}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use plainspeak::{ExplainError, ValidationError};
use serde_json::json;

/// Message used when an error has no text of its own.
pub const FALLBACK_MESSAGE: &str = "Unexpected error.";

/// Handler failure: 400 for bad input, 500 for anything the explainer returns.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Explain(ExplainError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Explain(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::Explain(e) => e.to_string(),
        };
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<ExplainError> for ApiError {
    fn from(err: ExplainError) -> Self {
        Self::Explain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Validation(e) => tracing::info!(error = %e, "explain request rejected"),
            Self::Explain(e) => tracing::error!(kind = e.kind(), error = %e, "explain failed"),
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

//! Axum app: state, router, and the explain handler.
//!
//! `POST /api/explain` validates the body, calls the shared [`Explainer`], and answers
//! 200 with the result, 400 on bad input, or 500 when the explainer fails.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::{get, post},
    Json, Router,
};
use plainspeak::{ExplainRequest, ExplainResult, Explainer, ValidationError};
use serde_json::{json, Value};
use tracing::{info, warn, Instrument};

use super::response::ApiError;

/// Shared state. The explainer is immutable, so concurrent requests share it freely.
pub(crate) struct AppState {
    pub(crate) explainer: Arc<Explainer>,
}

pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/explain", post(explain_handler))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handles `POST /api/explain`.
///
/// The body is taken as raw bytes so a malformed or unreadable body (including one over
/// the body limit) becomes a 400 with an `{error}` body instead of an extractor rejection
/// with a different status.
async fn explain_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ExplainResult>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("explain", %request_id);
    async move {
        let body = body.map_err(|rejection| {
            warn!(status = %rejection.status(), "unreadable request body: {}", rejection.body_text());
            ValidationError::InvalidBody
        })?;
        let value: Value =
            serde_json::from_slice(&body).map_err(|_| ValidationError::InvalidBody)?;
        let request = ExplainRequest::from_json(&value)?;
        info!(
            mode = %request.mode,
            clarification_round = request.has_answers(),
            "explain request"
        );
        let result = state.explainer.explain_request(&request).await?;
        Ok::<_, ApiError>(Json(result))
    }
    .instrument(span)
    .await
}

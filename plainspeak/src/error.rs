//! Errors returned by the explain pipeline.
//!
//! Every variant is terminal for the request that produced it; nothing is retried.

use thiserror::Error;

/// Message used when the provider answers with a non-success status and an empty body.
pub const UPSTREAM_FALLBACK: &str = "Completion request failed";

/// Failure of one `Explainer::explain` call.
///
/// `Display` is the message surfaced to HTTP callers, so it never includes internal
/// detail beyond what the provider itself returned.
#[derive(Debug, Error)]
pub enum ExplainError {
    /// No API credential is configured; raised before any network access.
    #[error("Missing configuration")]
    Configuration,

    /// The provider answered with a non-success status. Holds the response body text.
    #[error("{0}")]
    Upstream(String),

    /// The request never produced a response (connect failure, TLS, request build).
    #[error("{0}")]
    Transport(String),

    /// The reply was empty, not JSON, or missing required fields. The reason is for logs.
    #[error("Failed to parse model response")]
    Parse(String),
}

impl ExplainError {
    /// Builds an [`ExplainError::Upstream`] from a response body, using
    /// [`UPSTREAM_FALLBACK`] when the body is blank.
    pub fn upstream(body: impl Into<String>) -> Self {
        let body = body.into();
        if body.trim().is_empty() {
            Self::Upstream(UPSTREAM_FALLBACK.to_string())
        } else {
            Self::Upstream(body)
        }
    }

    /// Short, stable name of the variant for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Upstream(_) => "upstream",
            Self::Transport(_) => "transport",
            Self::Parse(_) => "parse",
        }
    }
}

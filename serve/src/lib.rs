//! HTTP server for plainspeak (axum).
//!
//! Listens on http://127.0.0.1:8080 by default and serves `POST /api/explain` plus
//! `GET /health`.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`run_serve_with_settings`].

mod app;
mod response;

use std::sync::Arc;

use plainspeak::Explainer;
use tokio::net::TcpListener;
use tracing::info;

use app::{router, AppState};

pub use response::ApiError;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Serves on an existing listener until the process is stopped. Used by tests (bind to
/// 127.0.0.1:0 then pass the listener).
pub async fn run_serve_on_listener(
    listener: TcpListener,
    explainer: Arc<Explainer>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!(
        clarification = explainer.config().clarification,
        "plainspeak listening on http://{}", addr
    );
    let app = router(Arc::new(AppState { explainer }));
    axum::serve(listener, app).await?;
    Ok(())
}

/// Binds `addr` (default [`DEFAULT_ADDR`]) and serves.
pub async fn run_serve(
    addr: Option<&str>,
    explainer: Arc<Explainer>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = addr.unwrap_or(DEFAULT_ADDR);
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, explainer).await
}

/// Builds an OpenAI-backed explainer from `settings` and serves on `addr_override`, else
/// `settings.server.addr`, else [`DEFAULT_ADDR`].
///
/// A missing API key is only logged here; requests then fail with "Missing configuration".
pub async fn run_serve_with_settings(
    settings: &config::Settings,
    addr_override: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if settings.completion.api_key.is_none() {
        tracing::warn!(
            "{} is not set; explain requests will fail until it is configured",
            config::API_KEY_ENV
        );
    }
    let explainer = Arc::new(Explainer::from_settings(settings));
    let addr = addr_override.or(settings.server.addr.as_deref());
    run_serve(addr, explainer).await
}

//! Logging initialization.
//!
//! Reads `RUST_LOG` (filter) and `LOG_FILE` (path) from env, after `.env` has been applied.
//! With `LOG_FILE` set, logs are appended to that file as plain text; otherwise they go to
//! stderr so stdout carries only the explain result.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// - **RUST_LOG**: e.g. `info`, `plainspeak=debug,serve=debug`. Default: `info`.
/// - **LOG_FILE**: append logs to this file (no ANSI colors).
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper_util=off"));

    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_filter(filter);
        tracing_subscriber::registry().with(file_layer).try_init()?;
        tracing::info!(path = %path, "plainspeak logging to file");
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter);
        tracing_subscriber::registry().with(stderr_layer).try_init()?;
    }
    Ok(())
}

//! Shared helpers for e2e tests. Responses are logged with `[e2e] received: ...`;
//! run with `--nocapture` to see them.

use std::sync::Arc;

use plainspeak::{Explainer, ExplainerConfig, MockCompletion};
use serde_json::Value;
use tokio::net::TcpListener;

pub const OK_REPLY: &str =
    r#"{"explanation":"It means you owe money.","summary":"A bill is due.","nextSteps":["Pay the bill"],"needsClarification":false}"#;

/// Binds 127.0.0.1:0 and spawns the server with `explainer`. Returns the base URL.
pub async fn spawn_server(explainer: Explainer) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(serve::run_serve_on_listener(listener, Arc::new(explainer)));
    url
}

/// Spawns a server backed by `mock` with clarification enabled.
pub async fn spawn_with_mock(mock: &Arc<MockCompletion>) -> String {
    spawn_server(Explainer::new(mock.clone(), ExplainerConfig::default())).await
}

/// POSTs a JSON body to `/api/explain`. Returns (status, parsed body).
pub async fn post_explain(url: &str, body: &Value) -> (u16, Value) {
    post_raw(url, &body.to_string()).await
}

/// POSTs raw bytes to `/api/explain` with a JSON content type.
pub async fn post_raw(url: &str, body: &str) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}/api/explain", url))
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .expect("request sent");
    let status = resp.status().as_u16();
    let text = resp.text().await.expect("response body");
    eprintln!("[e2e] received: {} {}", status, text);
    let value = serde_json::from_str(&text).expect("response is JSON");
    (status, value)
}

use std::sync::Arc;

use plainspeak::{CompletionConfig, Explainer, ExplainerConfig, MockCompletion};
use serde_json::json;

use super::common;

#[tokio::test]
async fn e2e_missing_api_key_is_500_missing_configuration() {
    // Real provider with no credential: fails before any network access.
    let explainer = Explainer::openai(
        CompletionConfig::default().with_base_url("http://192.0.2.1:9"),
        ExplainerConfig::default(),
    );
    let url = common::spawn_server(explainer).await;

    let (status, resp) = common::post_explain(&url, &json!({"text": "x"})).await;

    assert_eq!(status, 500);
    assert_eq!(resp, json!({"error": "Missing configuration"}));
}

#[tokio::test]
async fn e2e_upstream_body_is_surfaced() {
    let mock = Arc::new(MockCompletion::failing_upstream("model overloaded"));
    let url = common::spawn_with_mock(&mock).await;

    let (status, resp) = common::post_explain(&url, &json!({"text": "x"})).await;

    assert_eq!(status, 500);
    assert_eq!(resp, json!({"error": "model overloaded"}));
}

#[tokio::test]
async fn e2e_bad_model_reply_is_parse_error() {
    let mock = Arc::new(MockCompletion::with_content(r#"{"explanation":"only this"}"#));
    let url = common::spawn_with_mock(&mock).await;

    let (status, resp) = common::post_explain(&url, &json!({"text": "x"})).await;

    assert_eq!(status, 500);
    assert_eq!(resp, json!({"error": "Failed to parse model response"}));
}

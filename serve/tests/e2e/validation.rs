use std::sync::Arc;

use plainspeak::MockCompletion;
use serde_json::json;

use super::common;

#[tokio::test]
async fn e2e_empty_text_is_rejected_without_upstream_call() {
    let mock = Arc::new(MockCompletion::with_content(common::OK_REPLY));
    let url = common::spawn_with_mock(&mock).await;

    for body in [json!({"text": ""}), json!({"text": "   \n"}), json!({})] {
        let (status, resp) = common::post_explain(&url, &body).await;
        assert_eq!(status, 400, "{body}");
        assert_eq!(resp, json!({"error": "Text is required."}));
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn e2e_invalid_mode_is_rejected() {
    let mock = Arc::new(MockCompletion::with_content(common::OK_REPLY));
    let url = common::spawn_with_mock(&mock).await;

    let (status, resp) = common::post_explain(&url, &json!({"text": "x", "mode": "pirate"})).await;

    assert_eq!(status, 400);
    assert_eq!(resp, json!({"error": "Mode must be one of quick, normal, kid."}));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn e2e_malformed_body_is_rejected() {
    let mock = Arc::new(MockCompletion::with_content(common::OK_REPLY));
    let url = common::spawn_with_mock(&mock).await;

    let (status, resp) = common::post_raw(&url, "not valid json").await;

    assert_eq!(status, 400);
    assert_eq!(resp, json!({"error": "Invalid request body."}));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn e2e_oversized_body_is_rejected_as_invalid() {
    let mock = Arc::new(MockCompletion::with_content(common::OK_REPLY));
    let url = common::spawn_with_mock(&mock).await;

    // Well past the default 2 MB request body limit.
    let body = json!({ "text": "word ".repeat(600_000) });
    let (status, resp) = common::post_explain(&url, &body).await;

    assert_eq!(status, 400);
    assert_eq!(resp, json!({"error": "Invalid request body."}));
    assert_eq!(mock.call_count(), 0);
}

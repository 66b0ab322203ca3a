use std::sync::Arc;

use plainspeak::{Message, MockCompletion};
use serde_json::json;

use super::common;

#[tokio::test]
async fn e2e_explain_returns_result() {
    let mock = Arc::new(MockCompletion::with_content(common::OK_REPLY));
    let url = common::spawn_with_mock(&mock).await;

    let (status, body) = common::post_explain(&url, &json!({"text": "  Remit payment forthwith.  "})).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "explanation": "It means you owe money.",
            "summary": "A bill is due.",
            "nextSteps": ["Pay the bill"],
            "needsClarification": false
        })
    );
    let prompt = match mock.last_messages().unwrap().pop() {
        Some(Message::User(p)) => p,
        other => panic!("expected user message, got {:?}", other),
    };
    assert!(prompt.ends_with("Input:\nRemit payment forthwith."), "{prompt}");
}

#[tokio::test]
async fn e2e_next_steps_and_questions_are_clamped() {
    let reply = json!({
        "explanation": "e",
        "summary": "s",
        "nextSteps": ["a", "b", "c", "d", "e"],
        "needsClarification": true,
        "questions": ["q1", "q2", "q3"]
    });
    let mock = Arc::new(MockCompletion::with_content(reply.to_string()));
    let url = common::spawn_with_mock(&mock).await;

    let (status, body) = common::post_explain(&url, &json!({"text": "x", "mode": "kid"})).await;

    assert_eq!(status, 200);
    assert_eq!(body["nextSteps"], json!(["a", "b", "c", "d"]));
    assert_eq!(body["questions"], json!(["q1", "q2"]));
    assert_eq!(body["needsClarification"], json!(true));
}

#[tokio::test]
async fn e2e_clarification_round_sends_answers_upstream() {
    let mock = Arc::new(MockCompletion::with_content(common::OK_REPLY));
    let url = common::spawn_with_mock(&mock).await;

    let (status, _) = common::post_explain(
        &url,
        &json!({"text": "Your claim is pending review.", "mode": "quick", "answers": ["Yes", " ", "No"]}),
    )
    .await;

    assert_eq!(status, 200);
    let messages = mock.last_messages().unwrap();
    let prompt = messages[1].content();
    assert!(prompt.contains("1. Yes\n2. No"), "{prompt}");
}

#[tokio::test]
async fn e2e_health() {
    let mock = Arc::new(MockCompletion::with_content(common::OK_REPLY));
    let url = common::spawn_with_mock(&mock).await;
    let body: serde_json::Value = reqwest::get(format!("{}/health", url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

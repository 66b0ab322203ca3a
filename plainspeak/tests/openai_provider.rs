//! ChatOpenAI against a local stub of the chat completions endpoint.
//!
//! The stub counts hits and records the last request so tests can check both the wire
//! request and that no request is made when the credential is missing.


use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use plainspeak::{
    ChatOpenAI, CompletionConfig, CompletionProvider, ExplainError, Explainer, ExplainerConfig,
    Message, Mode,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: String,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<(Option<String>, Value)>>>,
}

impl Stub {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> (Option<String>, Value) {
        self.last.lock().unwrap().clone().expect("stub received a request")
    }
}

async fn stub_handler(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *stub.last.lock().unwrap() = Some((auth, body));
    (stub.status, stub.body.clone())
}

/// Spawns the stub on 127.0.0.1:0. Returns (base_url, stub).
async fn spawn_stub(status: StatusCode, body: impl Into<String>) -> (String, Stub) {
    let stub = Stub {
        status,
        body: body.into(),
        hits: Arc::new(AtomicUsize::new(0)),
        last: Arc::new(Mutex::new(None)),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(stub_handler))
        .with_state(stub.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), stub)
}

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
    })
    .to_string()
}

fn config(base_url: &str) -> CompletionConfig {
    CompletionConfig::default()
        .with_api_key("sk-test")
        .with_base_url(base_url)
}

#[tokio::test]
async fn sends_model_temperature_and_two_messages() {
    let (base, stub) = spawn_stub(StatusCode::OK, completion_body("{}")).await;
    let provider = ChatOpenAI::new(config(&base));
    let completion = provider
        .complete(&[Message::system("Return JSON only."), Message::user("prompt")])
        .await
        .unwrap();

    assert_eq!(completion.content.as_deref(), Some("{}"));
    assert_eq!(completion.usage.map(|u| u.total_tokens), Some(160));
    assert_eq!(stub.hits(), 1);

    let (auth, body) = stub.last_request();
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-4o-mini");
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.2).abs() < 1e-6, "temperature {temperature}");
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "Return JSON only.");
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "prompt");
}

#[tokio::test]
async fn non_success_status_returns_body_as_upstream_error() {
    let body = r#"{"error":{"message":"You exceeded your current quota"}}"#;
    let (base, _stub) = spawn_stub(StatusCode::TOO_MANY_REQUESTS, body).await;
    let err = ChatOpenAI::new(config(&base))
        .complete(&[Message::user("x")])
        .await
        .unwrap_err();
    assert!(matches!(err, ExplainError::Upstream(_)));
    assert_eq!(err.to_string(), body);
}

#[tokio::test]
async fn non_success_with_empty_body_uses_fallback() {
    let (base, _stub) = spawn_stub(StatusCode::BAD_GATEWAY, "").await;
    let err = ChatOpenAI::new(config(&base))
        .complete(&[Message::user("x")])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), plainspeak::error::UPSTREAM_FALLBACK);
}

#[tokio::test]
async fn missing_credential_never_reaches_endpoint() {
    let (base, stub) = spawn_stub(StatusCode::OK, completion_body("{}")).await;
    let provider = ChatOpenAI::new(CompletionConfig::default().with_base_url(base));
    let err = provider.complete(&[Message::user("x")]).await.unwrap_err();
    assert!(matches!(err, ExplainError::Configuration));
    assert_eq!(stub.hits(), 0);
}

#[tokio::test]
async fn success_body_that_is_not_json_is_parse_error() {
    let (base, _stub) = spawn_stub(StatusCode::OK, "<html>gateway</html>").await;
    let err = ChatOpenAI::new(config(&base))
        .complete(&[Message::user("x")])
        .await
        .unwrap_err();
    assert!(matches!(err, ExplainError::Parse(_)));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = ChatOpenAI::new(config(&format!("http://{}", addr)))
        .complete(&[Message::user("x")])
        .await
        .unwrap_err();
    assert!(matches!(err, ExplainError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn explainer_over_http_clamps_reply() {
    let reply = json!({
        "explanation": "The company may refuse to pay for this.",
        "summary": "Payment may be refused.",
        "nextSteps": ["a", "b", "c", "d", "e"],
        "needsClarification": false
    });
    let (base, stub) = spawn_stub(StatusCode::OK, completion_body(&reply.to_string())).await;
    let explainer = Explainer::openai(config(&base), ExplainerConfig::default());
    let result = explainer
        .explain("The insurer may deny coverage...", Mode::Normal, None)
        .await
        .unwrap();
    assert_eq!(result.next_steps, vec!["a", "b", "c", "d"]);

    let (_, body) = stub.last_request();
    let prompt = body["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("The insurer may deny coverage..."));
    assert!(prompt.contains(Mode::Normal.guidance()));
}

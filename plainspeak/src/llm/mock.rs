//! Mock completion provider for tests and examples.
//!
//! Returns one fixed reply for every call and records the messages it received, so tests
//! can assert on the exact prompt that would have been sent upstream.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ExplainError;
use crate::llm::{Completion, CompletionProvider};
use crate::message::Message;

#[derive(Clone, Debug)]
enum Reply {
    Content(Option<String>),
    Upstream(String),
    Unconfigured,
}

/// Canned [`CompletionProvider`].
pub struct MockCompletion {
    reply: Reply,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockCompletion {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call returns `content` as the assistant text.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self::with_reply(Reply::Content(Some(content.into())))
    }

    /// Every call succeeds with no assistant text.
    pub fn without_content() -> Self {
        Self::with_reply(Reply::Content(None))
    }

    /// Every call fails as if the provider answered non-2xx with `body`.
    pub fn failing_upstream(body: impl Into<String>) -> Self {
        Self::with_reply(Reply::Upstream(body.into()))
    }

    /// Every call fails as if no credential were configured. Not recorded as a call.
    pub fn unconfigured() -> Self {
        Self::with_reply(Reply::Unconfigured)
    }

    /// Number of calls that reached the provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Messages from the most recent call.
    pub fn last_messages(&self) -> Option<Vec<Message>> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(&self, messages: &[Message]) -> Result<Completion, ExplainError> {
        if let Reply::Unconfigured = self.reply {
            return Err(ExplainError::Configuration);
        }
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(messages.to_vec());
        match &self.reply {
            Reply::Content(content) => Ok(Completion {
                content: content.clone(),
                usage: None,
            }),
            Reply::Upstream(body) => Err(ExplainError::upstream(body.clone())),
            Reply::Unconfigured => Err(ExplainError::Configuration),
        }
    }
}

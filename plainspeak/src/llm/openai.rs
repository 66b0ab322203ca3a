//! OpenAI-compatible Chat Completions provider.
//!
//! The request body is built with `async_openai` chat types and sent with `reqwest`, so a
//! non-success response body reaches the caller verbatim as [`ExplainError::Upstream`].
//! The reply is read leniently from `choices[0].message.content`; a missing choice or
//! content is reported as `content: None` and left to the explainer to reject.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
};

use crate::error::ExplainError;
use crate::llm::{Completion, CompletionConfig, CompletionProvider, CompletionUsage};
use crate::message::Message;

/// Chat Completions client implementing [`CompletionProvider`].
///
/// One `POST {base}/chat/completions` per call with a bearer credential, the configured
/// model and temperature, and the given messages.
pub struct ChatOpenAI {
    http: reqwest::Client,
    config: CompletionConfig,
}

#[derive(Deserialize)]
struct ChatCompletionBody {
    #[serde(default)]
    choices: Vec<ChoiceBody>,
    #[serde(default)]
    usage: Option<CompletionUsage>,
}

#[derive(Deserialize)]
struct ChoiceBody {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatOpenAI {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Reuse an existing HTTP client (shared pool, custom timeouts).
    pub fn with_http_client(http: reqwest::Client, config: CompletionConfig) -> Self {
        Self { http, config }
    }

    /// Chat completions URL for the configured base. Does not append /v1 when the base
    /// already ends with /v1.
    fn chat_completions_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }

    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
            })
            .collect()
    }
}

#[async_trait]
impl CompletionProvider for ChatOpenAI {
    async fn complete(&self, messages: &[Message]) -> Result<Completion, ExplainError> {
        let api_key = self.config.api_key().ok_or(ExplainError::Configuration)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.config.model.clone())
            .temperature(self.config.temperature)
            .messages(Self::messages_to_request(messages))
            .build()
            .map_err(|e| ExplainError::Transport(format!("completion request build failed: {}", e)))?;

        let trace_id = uuid::Uuid::new_v4().to_string();
        let url = self.chat_completions_url();
        debug!(
            trace_id = %trace_id,
            url = %url,
            model = %self.config.model,
            temperature = self.config.temperature,
            message_count = messages.len(),
            "chat completion create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "chat completion request body");
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExplainError::Transport(format!("completion request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExplainError::Transport(format!("reading completion response: {}", e)))?;
        trace!(trace_id = %trace_id, status = %status, response = %body, "chat completion response body");

        if !status.is_success() {
            warn!(trace_id = %trace_id, status = %status, "chat completion returned non-success status");
            return Err(ExplainError::upstream(body));
        }

        let parsed: ChatCompletionBody = serde_json::from_str(&body)
            .map_err(|e| ExplainError::Parse(format!("completion body is not valid JSON: {}", e)))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content);

        if let Some(ref usage) = parsed.usage {
            debug!(
                trace_id = %trace_id,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "chat completion usage"
            );
        }

        Ok(Completion {
            content,
            usage: parsed.usage,
        })
    }
}

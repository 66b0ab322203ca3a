//! Completion provider abstraction.
//!
//! The explainer depends on one capability: send role-tagged messages, get back the
//! assistant's text. [`ChatOpenAI`] does this over HTTP against an OpenAI-compatible
//! endpoint; [`MockCompletion`] returns canned replies so prompt building and reply
//! validation can be tested without network access.

mod mock;
mod openai;

use std::fmt;

use async_trait::async_trait;

use crate::error::ExplainError;
use crate::message::Message;

pub use mock::MockCompletion;
pub use openai::ChatOpenAI;

/// Default OpenAI API base (the `/chat/completions` path is appended).
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default sampling temperature; kept low so the JSON shape is followed.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Token usage reported by the provider for one call.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct CompletionUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Reply from one completion call.
#[derive(Clone, Debug, Default)]
pub struct Completion {
    /// Assistant text of the first choice; `None` when the provider returned none.
    pub content: Option<String>,
    pub usage: Option<CompletionUsage>,
}

/// Connection settings for [`ChatOpenAI`]. Passed in explicitly; nothing is read from the
/// process environment here.
#[derive(Clone)]
pub struct CompletionConfig {
    /// Bearer credential. `None` (or blank) makes every call fail with
    /// [`ExplainError::Configuration`] before any request is sent.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl CompletionConfig {
    /// Fills unset settings with the defaults above.
    pub fn from_settings(settings: &env_config::CompletionSettings) -> Self {
        let default = Self::default();
        Self {
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone().unwrap_or(default.base_url),
            model: settings.model.clone().unwrap_or(default.model),
            temperature: settings.temperature.unwrap_or(default.temperature),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The credential, if set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Sends one chat completion and returns the assistant text.
///
/// Implementations perform at most one outbound call per invocation and never retry.
/// Non-success responses map to [`ExplainError::Upstream`] carrying the response body.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<Completion, ExplainError>;
}

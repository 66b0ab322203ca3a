//! The explain round trip: prompt in, normalized [`ExplainResult`] out.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::error::ExplainError;
use crate::llm::{ChatOpenAI, CompletionConfig, CompletionProvider};
use crate::message::Message;
use crate::mode::Mode;
use crate::prompts::{build_prompt, SYSTEM_PROMPT};
use crate::request::ExplainRequest;
use crate::result::{parse_reply, ExplainResult};

/// Behavior switches for [`Explainer`].
#[derive(Clone, Debug)]
pub struct ExplainerConfig {
    /// When true (default) the model may ask up to two clarifying questions and must
    /// report `needsClarification`.
    pub clarification: bool,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self { clarification: true }
    }
}

impl ExplainerConfig {
    pub fn from_settings(settings: &env_config::CompletionSettings) -> Self {
        Self {
            clarification: settings.clarification.unwrap_or(true),
        }
    }
}

/// Builds the prompt, makes exactly one provider call, and validates the reply.
///
/// Holds no per-request state; share it behind an `Arc` across concurrent callers.
pub struct Explainer {
    provider: Arc<dyn CompletionProvider>,
    config: ExplainerConfig,
}

impl Explainer {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: ExplainerConfig) -> Self {
        Self { provider, config }
    }

    /// Explainer backed by [`ChatOpenAI`].
    pub fn openai(completion: CompletionConfig, config: ExplainerConfig) -> Self {
        Self::new(Arc::new(ChatOpenAI::new(completion)), config)
    }

    /// Builds an OpenAI-backed explainer from loaded settings.
    pub fn from_settings(settings: &env_config::Settings) -> Self {
        Self::openai(
            CompletionConfig::from_settings(&settings.completion),
            ExplainerConfig::from_settings(&settings.completion),
        )
    }

    pub fn config(&self) -> &ExplainerConfig {
        &self.config
    }

    /// Explains `text` in the given `mode`.
    ///
    /// `answers` are the user's replies to a previous round's questions; an empty slice is
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// [`ExplainError::Configuration`] when no credential is set (no call is made),
    /// [`ExplainError::Upstream`] / [`ExplainError::Transport`] from the provider, and
    /// [`ExplainError::Parse`] when the reply is empty or has the wrong shape.
    pub async fn explain(
        &self,
        text: &str,
        mode: Mode,
        answers: Option<&[String]>,
    ) -> Result<ExplainResult, ExplainError> {
        let answers = answers.filter(|a| !a.is_empty());
        debug!(
            mode = %mode,
            input_len = text.len(),
            answer_count = answers.map_or(0, |a| a.len()),
            clarification = self.config.clarification,
            "explain"
        );

        let prompt = build_prompt(text, mode, answers, self.config.clarification);
        trace!(prompt = %prompt, "explain prompt");
        let messages = [Message::system(SYSTEM_PROMPT), Message::user(prompt)];

        let completion = self.provider.complete(&messages).await?;
        let content = completion
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ExplainError::Parse("empty response from model".to_string()))
            .map_err(log_parse_failure)?;
        trace!(reply = %content, "explain reply");

        let result = parse_reply(&content, self.config.clarification).map_err(log_parse_failure)?;
        debug!(
            next_steps = result.next_steps.len(),
            needs_clarification = result.needs_clarification,
            "explain done"
        );
        Ok(result)
    }

    /// [`Explainer::explain`] for an already validated request.
    pub async fn explain_request(&self, request: &ExplainRequest) -> Result<ExplainResult, ExplainError> {
        self.explain(&request.text, request.mode, request.answers.as_deref())
            .await
    }
}

fn log_parse_failure(err: ExplainError) -> ExplainError {
    if let ExplainError::Parse(ref reason) = err {
        warn!(reason = %reason, "model reply rejected");
    }
    err
}

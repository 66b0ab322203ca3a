//! # Plainspeak
//!
//! Turns confusing text into a plain-language explanation, a short summary and a list of
//! next steps, optionally after the user answers up to two clarifying questions.
//!
//! One call is one round trip: the [`Explainer`] builds an instruction prompt from the input,
//! the requested [`Mode`] and any prior answers, sends it through a [`CompletionProvider`],
//! then validates and clamps the JSON reply into an [`ExplainResult`].
//!
//! ## Main modules
//!
//! - [`explainer`]: [`Explainer`], [`ExplainerConfig`] — prompt in, normalized result out.
//! - [`llm`]: [`CompletionProvider`] trait, [`ChatOpenAI`] (OpenAI-compatible chat completions),
//!   [`MockCompletion`] (canned replies for tests).
//! - [`mode`]: [`Mode`] presets (quick, normal, kid).
//! - [`request`]: [`ExplainRequest`] and inbound field validation ([`ValidationError`]).
//! - [`result`]: [`ExplainResult`] and reply parsing.
//! - [`error`]: [`ExplainError`].

pub mod error;
pub mod explainer;
pub mod llm;
pub mod message;
pub mod mode;
pub mod prompts;
pub mod request;
pub mod result;

pub use error::ExplainError;
pub use explainer::{Explainer, ExplainerConfig};
pub use llm::{
    ChatOpenAI, Completion, CompletionConfig, CompletionProvider, CompletionUsage, MockCompletion,
};
pub use message::Message;
pub use mode::Mode;
pub use request::{ExplainRequest, ValidationError};
pub use result::{ExplainResult, MAX_NEXT_STEPS, MAX_QUESTIONS};

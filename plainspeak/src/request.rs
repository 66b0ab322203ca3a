//! Inbound explain request and its field validation.
//!
//! Shared by the HTTP handler and the CLI so both reject the same inputs with the same
//! messages before the explainer is ever called.

use serde_json::Value;
use thiserror::Error;

use crate::mode::Mode;

/// Rejected inbound fields. `Display` is the message returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Body was not a JSON object.
    #[error("Invalid request body.")]
    InvalidBody,
    /// `text` missing, not a string, or blank after trimming.
    #[error("Text is required.")]
    MissingText,
    /// `mode` given but not one of the recognized presets.
    #[error("Mode must be one of quick, normal, kid.")]
    InvalidMode,
}

/// A validated request: trimmed non-empty text, a mode, and optional non-empty answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainRequest {
    pub text: String,
    pub mode: Mode,
    /// `None` on a first round; `Some` only when at least one non-blank answer was given.
    pub answers: Option<Vec<String>>,
}

impl ExplainRequest {
    /// Validates raw fields.
    ///
    /// Text is trimmed and must be non-empty; a missing mode defaults to [`Mode::Normal`];
    /// answers are trimmed and blank ones dropped, leaving `None` if nothing remains.
    pub fn from_parts<I, S>(text: Option<&str>, mode: Option<&str>, answers: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = text.map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(ValidationError::MissingText);
        }
        let mode = match mode {
            Some(m) => m.parse::<Mode>().map_err(|_| ValidationError::InvalidMode)?,
            None => Mode::default(),
        };
        let answers: Vec<String> = answers
            .into_iter()
            .map(|a| a.as_ref().trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        Ok(Self {
            text: text.to_string(),
            mode,
            answers: if answers.is_empty() { None } else { Some(answers) },
        })
    }

    /// Validates a JSON request body `{ text, mode?, answers? }`.
    ///
    /// A non-string `text` counts as missing; a non-string `mode` is invalid (`null` means
    /// absent); `answers` that is not an array is ignored and non-string entries are skipped.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = body.as_object().ok_or(ValidationError::InvalidBody)?;
        let text = obj.get("text").and_then(Value::as_str);
        let mode = match obj.get("mode") {
            None | Some(Value::Null) => None,
            Some(Value::String(m)) => Some(m.as_str()),
            Some(_) => {
                // Text is checked first so a blank text wins over a bad mode.
                if text.map(str::trim).unwrap_or_default().is_empty() {
                    return Err(ValidationError::MissingText);
                }
                return Err(ValidationError::InvalidMode);
            }
        };
        let answers = obj
            .get("answers")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect::<Vec<_>>())
            .unwrap_or_default();
        Self::from_parts(text, mode, answers)
    }

    /// True on a clarification round.
    pub fn has_answers(&self) -> bool {
        self.answers.is_some()
    }
}

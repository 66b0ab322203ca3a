//! The normalized explanation returned to callers, and parsing of the model's reply.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ExplainError;

/// Upper bound on `next_steps`; extra items from the model are dropped.
pub const MAX_NEXT_STEPS: usize = 4;
/// Upper bound on `questions`; extra items from the model are dropped.
pub const MAX_QUESTIONS: usize = 2;

/// Result of one explain call. Serialized with camelCase keys; `questions` is omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResult {
    pub explanation: String,
    pub summary: String,
    /// At most [`MAX_NEXT_STEPS`] entries.
    pub next_steps: Vec<String>,
    pub needs_clarification: bool,
    /// At most [`MAX_QUESTIONS`] entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,
}

/// Parses the model's textual reply into an [`ExplainResult`].
///
/// Required: non-empty `explanation` and `summary` strings, `nextSteps` array, and (only when
/// `clarification` is on) a boolean `needsClarification`. Optional fields are lenient: a
/// `questions` value that is not an array is ignored and non-string list entries are skipped.
/// With `clarification` off, `needsClarification` is always false and `questions` is dropped.
pub fn parse_reply(content: &str, clarification: bool) -> Result<ExplainResult, ExplainError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| ExplainError::Parse(format!("reply is not valid JSON: {}", e)))?;
    let obj = value
        .as_object()
        .ok_or_else(|| ExplainError::Parse("reply is not a JSON object".to_string()))?;

    let explanation = required_text(obj, "explanation")?;
    let summary = required_text(obj, "summary")?;
    let next_steps = obj
        .get("nextSteps")
        .and_then(Value::as_array)
        .map(|items| strings(items, MAX_NEXT_STEPS))
        .ok_or_else(|| ExplainError::Parse("`nextSteps` is missing or not an array".to_string()))?;

    let (needs_clarification, questions) = if clarification {
        let needs = obj
            .get("needsClarification")
            .and_then(Value::as_bool)
            .ok_or_else(|| {
                ExplainError::Parse("`needsClarification` is missing or not a boolean".to_string())
            })?;
        let questions = obj
            .get("questions")
            .and_then(Value::as_array)
            .map(|items| strings(items, MAX_QUESTIONS));
        (needs, questions)
    } else {
        (false, None)
    };

    Ok(ExplainResult {
        explanation,
        summary,
        next_steps,
        needs_clarification,
        questions,
    })
}

fn required_text(obj: &Map<String, Value>, key: &str) -> Result<String, ExplainError> {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ExplainError::Parse(format!(
            "`{}` is missing, empty or not a string",
            key
        ))),
    }
}

fn strings(items: &[Value], limit: usize) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .take(limit)
        .map(str::to_string)
        .collect()
}

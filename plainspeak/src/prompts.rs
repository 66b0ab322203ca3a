//! Instruction template sent to the model.
//!
//! The user message is assembled from fixed sections: rules, output keys, mode guidance,
//! the raw input and, on a clarification round, the user's answers.

use crate::mode::Mode;

/// System message for every request.
pub const SYSTEM_PROMPT: &str = "Return JSON only. No extra text.";

const RULES: &str = "\
You are a helpful human who explains confusing text. Follow these rules:
- Write like a helpful human.
- No jargon unless you define it.
- Short paragraphs.
- If input is unclear, say what's missing instead of guessing.
- Never claim certainty when it's vague.
- No \"as an AI model\" language.";

const CLARIFY_RULE: &str = "\
- If the input is vague or missing context, set needsClarification to true and ask 1-2 questions.";

const ANSWERED_RULE: &str = "\
- The user already answered your earlier questions (see Answers below). Use those answers, \
set needsClarification to false and do not ask again.";

const OUTPUT_KEYS: &str = "\
Output JSON only with keys:
explanation (2-6 short paragraphs),
summary (1-2 sentences),
nextSteps (1-4 bullet items, as array of strings)";

const CLARIFY_KEYS: &str = ",
needsClarification (boolean),
questions (optional array of 1-2 strings)";

/// Builds the user prompt.
///
/// * `answers`: prior clarification answers, listed in order when present and non-empty.
/// * `clarification`: when false the model is never told to ask questions, and the
///   clarification keys are left out of the requested shape.
pub fn build_prompt(input: &str, mode: Mode, answers: Option<&[String]>, clarification: bool) -> String {
    let answers = answers.filter(|a| !a.is_empty());

    let mut prompt = String::from(RULES);
    if clarification {
        prompt.push('\n');
        prompt.push_str(if answers.is_some() { ANSWERED_RULE } else { CLARIFY_RULE });
    }

    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_KEYS);
    if clarification {
        prompt.push_str(CLARIFY_KEYS);
    }
    prompt.push('.');

    prompt.push_str("\n\nMode guidance:\n");
    prompt.push_str(mode.guidance());

    prompt.push_str("\n\nInput:\n");
    prompt.push_str(input);

    if let Some(answers) = answers {
        prompt.push_str("\n\nAnswers to your earlier questions:");
        for (i, answer) in answers.iter().enumerate() {
            prompt.push_str(&format!("\n{}. {}", i + 1, answer));
        }
    }

    prompt
}

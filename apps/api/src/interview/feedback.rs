//! Feedback generation: flattens a finished interview into a transcript and
//! requests a structured evaluation from the dialogue client.

use crate::dialogue::DialogueClient;
use crate::errors::AppError;
use crate::interview::history::{ConversationHistory, Role};
use crate::interview::prompts::FEEDBACK_PROMPT_TEMPLATE;

/// Flattens a history into a plain-text transcript, one utterance per block:
/// user turns labeled "Candidate", model turns labeled "Interviewer", in the
/// original order, joined by a blank line.
pub fn flatten_transcript(history: &ConversationHistory) -> String {
    history
        .turns()
        .iter()
        .map(|turn| match turn.role {
            Role::User => format!("Candidate: {}", turn.text()),
            Role::Model => format!("Interviewer: {}", turn.text()),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Requests a feedback report for a finished interview.
///
/// One-shot: the transcript plus the fixed evaluation prompt go upstream in
/// a single call, and the raw markdown comes back. Calling it twice issues
/// two independent requests; the report text may differ between them.
pub async fn summarize(
    dialogue: &dyn DialogueClient,
    history: &ConversationHistory,
) -> Result<String, AppError> {
    let prompt = FEEDBACK_PROMPT_TEMPLATE.replace("{transcript}", &flatten_transcript(history));

    dialogue
        .generate(&ConversationHistory::primed(prompt))
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to generate feedback: {e}")))
}

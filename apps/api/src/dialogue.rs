/// Dialogue client — the single point of entry for all generative-language calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through `DialogueClient`.
///
/// Model: gemini-1.5-flash (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::interview::history::ConversationHistory;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all dialogue calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned no text")]
    EmptyReply,
}

/// Object-safe seam over the generative backend.
///
/// `AppState` carries an `Arc<dyn DialogueClient>` built once at startup,
/// so tests can swap in a scripted double without touching the handlers.
#[async_trait]
pub trait DialogueClient: Send + Sync {
    /// Sends the full turn log upstream and returns the model's next
    /// utterance. One-shot: no retry and no client-side timeout, so a slow
    /// or failed call surfaces directly to the caller.
    async fn generate(&self, history: &ConversationHistory) -> Result<String, DialogueError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: &'a ConversationHistory,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UsageMetadata {
    prompt_token_count: u32,
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Production dialogue backend speaking the Generative Language
/// `generateContent` REST API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl DialogueClient for GeminiClient {
    async fn generate(&self, history: &ConversationHistory) -> Result<String, DialogueError> {
        let url = format!(
            "{GEMINI_API_BASE}/{MODEL}:generateContent?key={}",
            self.api_key
        );
        let request_body = GenerateContentRequest { contents: history };

        let response = self.client.post(&url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured error message when the body parses
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(DialogueError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Dialogue call succeeded: prompt_tokens={}, reply_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        extract_reply(parsed).ok_or(DialogueError::EmptyReply)
    }
}

/// Joins the text parts of the first candidate into one reply, if any.
/// The model may split a single utterance across several parts.
fn extract_reply(response: GenerateContentResponse) -> Option<String> {
    let text: String = response
        .candidates
        .into_iter()
        .flatten()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .into_iter()
        .flatten()
        .filter_map(|part| part.text)
        .collect();

    (!text.is_empty()).then_some(text)
}

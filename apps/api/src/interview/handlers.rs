//! Axum route handlers for the Interview API.
//!
//! The server keeps no conversation state: the full history travels in every
//! request/response pair, so any instance can serve any turn.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::interview::feedback::summarize;
use crate::interview::history::ConversationHistory;
use crate::interview::prompts::{compose_opening_prompt, InterviewKind};
use crate::interview::session::{advance, start};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartInterviewResponse {
    pub first_question: String,
    pub conversation_history: ConversationHistory,
}

/// Fields are optional so an absent field surfaces as this API's 400
/// validation error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub user_message: Option<String>,
    pub conversation_history: Option<ConversationHistory>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub ai_response: String,
    pub updated_history: ConversationHistory,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub conversation_history: Option<ConversationHistory>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interview/start
///
/// Multipart form: `resumeFile` (binary), `jdFile` (binary), `interviewType`
/// (text). Extracts both documents, composes the opening prompt, and opens
/// the session. Returns the first question and the initial two-turn history.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<StartInterviewResponse>, AppError> {
    let mut resume_bytes: Option<Bytes> = None;
    let mut jd_bytes: Option<Bytes> = None;
    let mut interview_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resumeFile" => resume_bytes = Some(read_file_field(field).await?),
            "jdFile" => jd_bytes = Some(read_file_field(field).await?),
            "interviewType" => {
                interview_type = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Could not read interviewType: {e}"))
                })?)
            }
            // Unknown fields are ignored rather than rejected
            _ => {}
        }
    }

    let (Some(resume_bytes), Some(jd_bytes)) = (resume_bytes, jd_bytes) else {
        return Err(AppError::Validation(
            "Resume and job description files are required.".to_string(),
        ));
    };

    let resume_text = extract_text(&resume_bytes)?;
    let jd_text = extract_text(&jd_bytes)?;

    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "The resume contained no extractable text.".to_string(),
        ));
    }
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation(
            "The job description contained no extractable text.".to_string(),
        ));
    }

    let kind = InterviewKind::parse(interview_type.as_deref().unwrap_or_default());
    info!(
        "Starting {kind:?} interview (resume: {} chars, jd: {} chars)",
        resume_text.len(),
        jd_text.len()
    );

    let opening_prompt = compose_opening_prompt(&resume_text, &jd_text, kind);
    let (first_question, conversation_history) =
        start(state.dialogue.as_ref(), &opening_prompt).await?;

    Ok(Json(StartInterviewResponse {
        first_question,
        conversation_history,
    }))
}

/// POST /api/v1/interview/chat
///
/// Replays the client-held history plus the new user message, and returns
/// the reply together with the history extended by exactly two turns. The
/// returned history round-trips: the client sends it back unmodified on the
/// next call.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let user_message = request
        .user_message
        .ok_or_else(|| AppError::Validation("userMessage is required.".to_string()))?;
    let history = request
        .conversation_history
        .ok_or_else(|| AppError::Validation("conversationHistory is required.".to_string()))?;

    debug!("Advancing interview: history_len={}", history.len());

    let (ai_response, updated_history) =
        advance(state.dialogue.as_ref(), &history, &user_message).await?;

    Ok(Json(ChatResponse {
        ai_response,
        updated_history,
    }))
}

/// POST /api/v1/interview/feedback
///
/// Flattens the finished history into a transcript and returns the
/// evaluation report as raw markdown.
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let history = request
        .conversation_history
        .ok_or_else(|| AppError::Validation("conversationHistory is required.".to_string()))?;

    info!("Generating feedback for {} turns", history.len());

    let feedback = summarize(state.dialogue.as_ref(), &history).await?;

    Ok(Json(FeedbackResponse { feedback }))
}

async fn read_file_field(field: axum::extract::multipart::Field<'_>) -> Result<Bytes, AppError> {
    field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))
}

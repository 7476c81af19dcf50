//! All dialogue prompt constants for the interview flow.
//!
//! The prompt text is the only mechanism steering the model's interviewing
//! behavior. Compliance with the one-question rule is a soft guarantee, not
//! something this service can verify.

/// Interviewer persona requested by the client. Anything the client sends
/// that is not recognized falls back to the UI's default selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterviewKind {
    #[default]
    Hr,
    Technical,
}

impl InterviewKind {
    /// Parses the `interviewType` form value, case-insensitively.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("technical") {
            InterviewKind::Technical
        } else {
            InterviewKind::Hr
        }
    }

    /// The role label embedded in the opening prompt.
    pub fn label(&self) -> &'static str {
        match self {
            InterviewKind::Hr => "HR",
            InterviewKind::Technical => "Technical",
        }
    }
}

/// Opening prompt template. Replace `{interviewer_role}`, `{jd_text}` and
/// `{resume_text}` before sending.
pub const OPENING_PROMPT_TEMPLATE: &str = r#"You are an expert {interviewer_role} interviewer and your name is "Gemini".
You are running a screening interview for the role below. You have the job description and the candidate's resume.

**Job Description:**
---
{jd_text}
---

**Candidate's Resume:**
---
{resume_text}
---

**Ground rules:**
1. Open the interview by introducing yourself by name.
2. Ask ONE question at a time, then wait for the candidate's answer.
3. Keep every response concise and conversational.
4. Your first response must contain ONLY your introduction and your first question. Start now."#;

/// Feedback prompt template. Replace `{transcript}` before sending.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"You are an expert career coach and interview analyst.
Provide constructive feedback on the interview transcript below. Analyze the candidate's answers for clarity, relevance, and communication skills. Do not judge the interviewer's questions.

Structure your feedback in Markdown with the following sections:
- **## Overall Summary:** A brief, encouraging overview of the performance.
- **## Strengths:** 2-3 bullet points highlighting what the candidate did well.
- **## Areas for Improvement:** 2-3 specific, actionable suggestions for what the candidate could do better.
- **## Communication Score:** A score out of 10 for communication, with a brief justification.

Here is the interview transcript:
---
{transcript}
---"#;

/// Builds the deterministic opening prompt, embedding both extracted texts
/// verbatim and exactly one interviewer role label.
pub fn compose_opening_prompt(resume_text: &str, jd_text: &str, kind: InterviewKind) -> String {
    OPENING_PROMPT_TEMPLATE
        .replace("{interviewer_role}", kind.label())
        .replace("{jd_text}", jd_text)
        .replace("{resume_text}", resume_text)
}

//! Conversation session: the start/advance operations over the dialogue
//! client, plus the client-side driver that holds one interview's state.
//!
//! The operations never mutate a history in place: every call hands back a
//! new value and the caller keeps the latest one. No concurrent advance
//! calls on one history are supported; the driver serializes exchanges
//! structurally by taking `&mut self`.

use tracing::warn;

use crate::dialogue::DialogueClient;
use crate::errors::AppError;
use crate::interview::capture::SpeechCapture;
use crate::interview::history::ConversationHistory;

/// Synthetic interviewer utterance shown when a chat turn fails. The session
/// keeps going instead of halting; the canonical history is left untouched.
#[allow(dead_code)]
pub const APOLOGY_UTTERANCE: &str = "Sorry, I encountered an error.";

/// Opens a session: sends the single-turn history holding only the opening
/// prompt, and returns the model's first utterance together with the
/// two-turn history `[user: opening_prompt, model: first_utterance]`.
pub async fn start(
    dialogue: &dyn DialogueClient,
    opening_prompt: &str,
) -> Result<(String, ConversationHistory), AppError> {
    let mut history = ConversationHistory::primed(opening_prompt);

    let first_utterance = dialogue
        .generate(&history)
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to start the interview: {e}")))?;

    history.push_model(&first_utterance);
    Ok((first_utterance, history))
}

/// Advances a session by one exchange: replays `history` verbatim plus the
/// new user turn, and returns the reply with a new history carrying exactly
/// two appended turns (user, then model). The input history is not mutated.
///
/// An empty `user_utterance` is rejected before any upstream call is made.
pub async fn advance(
    dialogue: &dyn DialogueClient,
    history: &ConversationHistory,
    user_utterance: &str,
) -> Result<(String, ConversationHistory), AppError> {
    if user_utterance.trim().is_empty() {
        return Err(AppError::Validation(
            "userMessage must not be empty".to_string(),
        ));
    }

    let mut updated = history.clone();
    updated.push_user(user_utterance);

    let reply = dialogue
        .generate(&updated)
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to get the interviewer's response: {e}")))?;

    updated.push_model(&reply);
    Ok((reply, updated))
}

/// Attribution for one displayed message.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Candidate,
    Interviewer,
}

/// One message in the displayed conversation log. Unlike the canonical
/// history, the log may carry synthetic entries such as the apology
/// utterance after a failed turn.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// Client-side driver for one interview. The server binary never constructs
/// one; it models what the browser holds between requests.
///
/// Owns the latest canonical history, the displayed message log, the typed
/// draft answer, and the voice-capture state. Created from the start
/// operation's output, mutated by exactly two appended turns per successful
/// exchange, and terminated by handing the full history to the feedback step.
#[allow(dead_code)]
#[derive(Debug)]
pub struct Session {
    history: ConversationHistory,
    log: Vec<LogEntry>,
    draft: String,
    capture: SpeechCapture,
}

#[allow(dead_code)]
impl Session {
    /// Opens the interview from a composed opening prompt.
    pub async fn begin(
        dialogue: &dyn DialogueClient,
        opening_prompt: &str,
    ) -> Result<Self, AppError> {
        let (first_utterance, history) = start(dialogue, opening_prompt).await?;
        Ok(Session {
            history,
            log: vec![LogEntry {
                speaker: Speaker::Interviewer,
                text: first_utterance,
            }],
            draft: String::new(),
            capture: SpeechCapture::new(),
        })
    }

    /// The latest canonical history. Grows by two turns per successful
    /// exchange and never shrinks within one session.
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// The displayed conversation log, in order.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the typed draft answer.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_capturing()
    }

    /// The interim transcript accumulated while capturing.
    pub fn capture_transcript(&self) -> &str {
        self.capture.transcript()
    }

    /// Begins voice capture, resetting any pending transcript.
    pub fn start_capture(&mut self) {
        self.capture.start();
    }

    /// Feeds an interim recognition result into the capture buffer.
    pub fn push_interim(&mut self, interim: &str) {
        self.capture.push_interim(interim);
    }

    /// Submits one answer. On success the canonical history advances by two
    /// turns and the reply joins the log. On failure the log gains the
    /// apology utterance and the history is left unchanged, so the next
    /// successful exchange still replays a clean transcript. Blank answers
    /// are dropped without an upstream call.
    pub async fn submit(&mut self, dialogue: &dyn DialogueClient, answer: &str) {
        if answer.trim().is_empty() {
            return;
        }

        self.log.push(LogEntry {
            speaker: Speaker::Candidate,
            text: answer.to_string(),
        });

        match advance(dialogue, &self.history, answer).await {
            Ok((reply, updated)) => {
                self.history = updated;
                self.log.push(LogEntry {
                    speaker: Speaker::Interviewer,
                    text: reply,
                });
            }
            Err(e) => {
                warn!("Chat turn failed, continuing with an apology: {e}");
                self.log.push(LogEntry {
                    speaker: Speaker::Interviewer,
                    text: APOLOGY_UTTERANCE.to_string(),
                });
            }
        }

        // Playback of the reply (or the apology) starts now, which discards
        // any capture left in flight.
        self.capture.cancel_on_playback();
    }

    /// Submits and clears the typed draft answer.
    pub async fn submit_draft(&mut self, dialogue: &dyn DialogueClient) {
        let answer = std::mem::take(&mut self.draft);
        self.submit(dialogue, &answer).await;
    }

    /// Stops voice capture and submits whatever was transcribed.
    pub async fn submit_capture(&mut self, dialogue: &dyn DialogueClient) {
        let transcript = self.capture.stop_and_submit();
        self.submit(dialogue, &transcript).await;
    }

    /// Ends the interview, yielding the full history for the feedback step.
    /// The session is consumed; nothing is retained afterwards.
    pub fn finish(self) -> ConversationHistory {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::testing::ScriptedDialogue;
    use crate::interview::history::Role;

    #[tokio::test]
    async fn test_start_returns_two_turn_history() {
        let dialogue =
            ScriptedDialogue::new().with_reply("Hi, I'm Gemini. Tell me about yourself.");

        let (first_utterance, history) =
            start(&dialogue, "Resume: Alice... JD: Backend engineer...")
                .await
                .unwrap();

        assert_eq!(first_utterance, "Hi, I'm Gemini. Tell me about yourself.");
        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role, Role::User);
        assert!(history.turns()[0]
            .text()
            .contains("Resume: Alice... JD: Backend engineer..."));
        assert_eq!(history.turns()[1].role, Role::Model);
        assert!(!history.turns()[1].text().is_empty());
    }

    #[tokio::test]
    async fn test_start_failure_is_upstream_error() {
        let dialogue = ScriptedDialogue::new().with_failure("model overloaded");

        let err = start(&dialogue, "opening").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
        assert!(err.to_string().contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_advance_appends_exactly_two_turns_user_then_model() {
        let dialogue = ScriptedDialogue::new().with_reply("Interesting. Why Rust?");
        let mut history = ConversationHistory::primed("opening");
        history.push_model("first question");

        let (reply, updated) = advance(&dialogue, &history, "I write Rust services")
            .await
            .unwrap();

        assert_eq!(reply, "Interesting. Why Rust?");
        assert_eq!(updated.len(), history.len() + 2);
        assert_eq!(updated.turns()[2].role, Role::User);
        assert_eq!(updated.turns()[2].text(), "I write Rust services");
        assert_eq!(updated.turns()[3].role, Role::Model);
        assert_eq!(updated.turns()[3].text(), "Interesting. Why Rust?");
    }

    #[tokio::test]
    async fn test_advance_replays_history_plus_new_user_turn_upstream() {
        let dialogue = ScriptedDialogue::new().with_reply("reply");
        let mut history = ConversationHistory::primed("opening");
        history.push_model("first question");

        advance(&dialogue, &history, "my answer").await.unwrap();

        let calls = dialogue.calls();
        assert_eq!(calls.len(), 1);
        let sent = &calls[0];
        assert_eq!(sent.len(), 3);
        assert_eq!(sent.turns()[..2], history.turns()[..]);
        assert_eq!(sent.turns()[2].role, Role::User);
        assert_eq!(sent.turns()[2].text(), "my answer");
    }

    #[tokio::test]
    async fn test_advance_output_contains_input_as_strict_prefix() {
        let dialogue = ScriptedDialogue::new()
            .with_reply("second question")
            .with_reply("third question");
        let mut history = ConversationHistory::primed("opening");
        history.push_model("first question");

        let (_, once) = advance(&dialogue, &history, "answer one").await.unwrap();
        let (_, twice) = advance(&dialogue, &once, "answer two").await.unwrap();

        assert_eq!(once.turns()[..history.len()], history.turns()[..]);
        assert_eq!(twice.turns()[..once.len()], once.turns()[..]);
        assert!(twice.len() > once.len());
    }

    #[tokio::test]
    async fn test_advance_does_not_mutate_its_input() {
        let dialogue = ScriptedDialogue::new().with_reply("reply");
        let mut history = ConversationHistory::primed("opening");
        history.push_model("first question");
        let before = history.clone();

        advance(&dialogue, &history, "answer").await.unwrap();

        assert_eq!(history, before);
    }

    #[tokio::test]
    async fn test_empty_utterance_is_rejected_before_any_upstream_call() {
        let dialogue = ScriptedDialogue::new().with_reply("never sent");
        let mut history = ConversationHistory::primed("hi");
        history.push_model("hello");
        let before = history.clone();

        let err = advance(&dialogue, &history, "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = advance(&dialogue, &history, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert_eq!(dialogue.call_count(), 0);
        assert_eq!(history, before);
    }

    #[tokio::test]
    async fn test_driver_begin_seeds_log_with_first_utterance() {
        let dialogue = ScriptedDialogue::new().with_reply("Hi, I'm Gemini. First question?");

        let session = Session::begin(&dialogue, "opening prompt").await.unwrap();

        assert_eq!(session.history().len(), 2);
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log()[0].speaker, Speaker::Interviewer);
        assert_eq!(session.log()[0].text, "Hi, I'm Gemini. First question?");
    }

    #[tokio::test]
    async fn test_driver_submit_advances_history_and_log() {
        let dialogue = ScriptedDialogue::new()
            .with_reply("First question?")
            .with_reply("Second question?");
        let mut session = Session::begin(&dialogue, "opening").await.unwrap();

        session.submit(&dialogue, "my answer").await;

        assert_eq!(session.history().len(), 4);
        assert_eq!(session.log().len(), 3);
        assert_eq!(session.log()[1].speaker, Speaker::Candidate);
        assert_eq!(session.log()[1].text, "my answer");
        assert_eq!(session.log()[2].speaker, Speaker::Interviewer);
        assert_eq!(session.log()[2].text, "Second question?");
    }

    #[tokio::test]
    async fn test_driver_failed_turn_degrades_to_apology_and_keeps_history() {
        let dialogue = ScriptedDialogue::new()
            .with_reply("First question?")
            .with_failure("model overloaded")
            .with_reply("Recovered question?");
        let mut session = Session::begin(&dialogue, "opening").await.unwrap();
        let history_before = session.history().clone();

        session.submit(&dialogue, "lost answer").await;

        // The log degrades to an apology; the canonical history is untouched.
        assert_eq!(session.history(), &history_before);
        assert_eq!(session.log().last().unwrap().text, APOLOGY_UTTERANCE);
        assert_eq!(session.log().last().unwrap().speaker, Speaker::Interviewer);

        // The session keeps going: the next turn replays a clean transcript.
        session.submit(&dialogue, "second try").await;
        assert_eq!(session.history().len(), 4);
        assert!(!session
            .history()
            .turns()
            .iter()
            .any(|t| t.text() == APOLOGY_UTTERANCE));
    }

    #[tokio::test]
    async fn test_driver_ignores_blank_answers() {
        let dialogue = ScriptedDialogue::new().with_reply("First question?");
        let mut session = Session::begin(&dialogue, "opening").await.unwrap();

        session.submit(&dialogue, "   ").await;

        assert_eq!(dialogue.call_count(), 1); // only the begin call
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn test_driver_submit_draft_clears_the_draft() {
        let dialogue = ScriptedDialogue::new()
            .with_reply("First question?")
            .with_reply("Noted. Next question?");
        let mut session = Session::begin(&dialogue, "opening").await.unwrap();

        session.set_draft("fn main() { println!(\"hi\"); }");
        assert_eq!(session.draft(), "fn main() { println!(\"hi\"); }");

        session.submit_draft(&dialogue).await;

        assert_eq!(session.draft(), "");
        assert_eq!(session.log()[1].text, "fn main() { println!(\"hi\"); }");
        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn test_driver_capture_flow_submits_the_transcript() {
        let dialogue = ScriptedDialogue::new()
            .with_reply("First question?")
            .with_reply("Good. Next question?");
        let mut session = Session::begin(&dialogue, "opening").await.unwrap();

        session.start_capture();
        assert!(session.is_capturing());
        session.push_interim("I built the");
        session.push_interim("billing pipeline");
        assert_eq!(session.capture_transcript(), "I built the billing pipeline");

        session.submit_capture(&dialogue).await;

        assert!(!session.is_capturing());
        assert_eq!(session.capture_transcript(), "");
        assert_eq!(session.log()[1].text, "I built the billing pipeline");
        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn test_driver_finish_yields_the_full_history() {
        let dialogue = ScriptedDialogue::new()
            .with_reply("First question?")
            .with_reply("Second question?");
        let mut session = Session::begin(&dialogue, "opening").await.unwrap();
        session.submit(&dialogue, "answer").await;

        let history = session.finish();
        assert_eq!(history.len(), 4);
    }
}

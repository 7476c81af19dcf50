//! Feedback handoff: the short-lived slot carrying a finished history from
//! the live interview to the feedback step.

use std::sync::Mutex;

use crate::interview::history::ConversationHistory;

/// Single-read slot for a finished interview history. On the wire this is
/// the browser session entry stored under the fixed key `interviewHistory`:
/// `store` parks the history when the interview ends, `take` hands it to the
/// feedback step and clears the slot, so a second read finds nothing.
#[derive(Debug, Default)]
pub struct FeedbackHandoff {
    slot: Mutex<Option<ConversationHistory>>,
}

impl FeedbackHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a finished history, replacing any value still pending.
    pub fn store(&self, history: ConversationHistory) {
        *self.slot.lock().unwrap() = Some(history);
    }

    /// Takes the pending history, leaving the slot empty.
    pub fn take(&self) -> Option<ConversationHistory> {
        self.slot.lock().unwrap().take()
    }

    pub fn is_pending(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }
}

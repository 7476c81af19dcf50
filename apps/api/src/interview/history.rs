//! Conversation history: the ordered turn log for one interview session.

use serde::{Deserialize, Serialize};

/// Speaker attribution for a turn. Serialized as the lowercase wire strings
/// `"user"` and `"model"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One text fragment of a turn. The upstream API allows several parts per
/// turn; this service always writes exactly one but accepts any number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// A single utterance attributed to one speaker. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Turn {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// The full text of this turn across all parts.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Ordered log of turns for one interview session.
///
/// Insertion order is chronological and significant: the whole log is
/// replayed verbatim upstream on every call. Within a session the log only
/// grows; turns are never reordered or removed. Strict role alternation is
/// not enforced, so consecutive turns with the same role are tolerated.
///
/// Serializes as a bare JSON array of turns, which is the shape the client
/// sends back unmodified on every `chat` and `feedback` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    #[allow(dead_code)]
    pub fn new() -> Self {
        ConversationHistory::default()
    }

    /// A fresh history holding the opening prompt as its only user turn.
    pub fn primed(opening_prompt: impl Into<String>) -> Self {
        ConversationHistory {
            turns: vec![Turn::user(opening_prompt)],
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::model(text));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

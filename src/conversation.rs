//! Conversation log and turn types

use crate::answer::{Answer, APOLOGY_TEXT};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// One message in the conversation, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    sender: Sender,
    text: String,
    timestamp: DateTime<Utc>,
    is_error: bool,
    citations: Vec<String>,
}

impl Turn {
    /// A user turn. The text is kept exactly as typed.
    pub fn user(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: at,
            is_error: false,
            citations: Vec::new(),
        }
    }

    /// A bot turn carrying a resolved answer
    pub fn bot(answer: Answer, at: DateTime<Utc>) -> Self {
        let Answer { text, citations } = answer;
        Self {
            sender: Sender::Bot,
            text,
            timestamp: at,
            is_error: false,
            citations,
        }
    }

    /// A bot turn standing in for a failed exchange
    pub fn error(at: DateTime<Utc>) -> Self {
        Self {
            sender: Sender::Bot,
            text: APOLOGY_TEXT.to_string(),
            timestamp: at,
            is_error: true,
            citations: Vec::new(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn citations(&self) -> &[String] {
        &self.citations
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }

    /// Whether the view may offer a citation toggle for this turn
    pub fn has_citations(&self) -> bool {
        self.is_bot() && !self.citations.is_empty()
    }
}

/// Append-only, ordered storage of turns
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn and return its index
    pub fn append(&mut self, turn: Turn) -> usize {
        self.turns.push(turn);
        self.turns.len() - 1
    }

    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn get(&self, index: usize) -> Option<&Turn> {
        self.turns.get(index)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }
}

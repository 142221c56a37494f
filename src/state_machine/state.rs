//! Conversation state types

use crate::answer::DEFAULT_TOP_K;
use serde::Serialize;

/// Conversation state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatState {
    /// Ready for user input, no exchange in flight
    #[default]
    Idle,

    /// User turn appended, answer request in flight
    Pending { query: String },
}

impl ChatState {
    pub fn is_pending(&self) -> bool {
        matches!(self, ChatState::Pending { .. })
    }
}

/// Context for a session (immutable configuration)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatContext {
    /// Maximum number of supporting sources requested per query
    pub top_k: u32,
}

impl ChatContext {
    pub fn new(top_k: u32) -> Self {
        Self { top_k }
    }
}

impl Default for ChatContext {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

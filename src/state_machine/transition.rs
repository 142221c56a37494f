//! Pure state transition function

use super::{ChatContext, ChatState, Effect, Event};
use crate::conversation::Turn;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// Input was empty after trimming; silently skipped
    #[error("Empty message ignored")]
    EmptyInput,
    #[error("Still waiting for the previous answer")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(
    state: &ChatState,
    context: &ChatContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Whitespace-only input never creates a turn, whatever the state
        (_, Event::UserSubmit { text, .. }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyInput)
        }

        // Idle + UserSubmit -> Pending. The user turn lands before the request goes out.
        (ChatState::Idle, Event::UserSubmit { text, at }) => {
            Ok(TransitionResult::new(ChatState::Pending {
                query: text.clone(),
            })
            .with_effect(Effect::append(Turn::user(text.clone(), at)))
            .with_effect(Effect::SetPending { pending: true })
            .with_effect(Effect::RequestAnswer {
                query: text,
                k: context.top_k,
            }))
        }

        // One exchange at a time
        (ChatState::Pending { .. }, Event::UserSubmit { .. }) => Err(TransitionError::Busy),

        (ChatState::Pending { .. }, Event::AnswerReceived { answer, at }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::append(Turn::bot(answer, at)))
                .with_effect(Effect::SetPending { pending: false }))
        }

        (ChatState::Pending { .. }, Event::AnswerFailed { at, .. }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::append(Turn::error(at)))
                .with_effect(Effect::SetPending { pending: false }))
        }

        (ChatState::Idle, Event::AnswerReceived { .. } | Event::AnswerFailed { .. }) => Err(
            TransitionError::InvalidTransition("answer arrived with no exchange pending".into()),
        ),
    }
}

//! Effects produced by state transitions

use crate::conversation::Turn;

/// Effects to be executed, in order, after a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a turn to the conversation log and notify observers
    AppendTurn { turn: Turn },

    /// Publish the new value of the pending flag
    SetPending { pending: bool },

    /// Dispatch the single answer request for the current exchange
    RequestAnswer { query: String, k: u32 },
}

impl Effect {
    pub fn append(turn: Turn) -> Self {
        Effect::AppendTurn { turn }
    }
}

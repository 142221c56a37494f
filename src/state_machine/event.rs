//! Events that can occur in a conversation

use crate::answer::{Answer, ServiceErrorKind};
use chrono::{DateTime, Utc};

/// Events that trigger state transitions
///
/// Every event carries the time it happened so `transition` never reads the clock.
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserSubmit {
        text: String,
        at: DateTime<Utc>,
    },

    // Answer service events
    AnswerReceived {
        answer: Answer,
        at: DateTime<Utc>,
    },
    AnswerFailed {
        message: String,
        kind: ServiceErrorKind,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn user_submit(text: impl Into<String>) -> Self {
        Event::UserSubmit {
            text: text.into(),
            at: Utc::now(),
        }
    }
}

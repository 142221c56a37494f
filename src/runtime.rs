//! Runtime for executing a chat session
//!
//! The runtime task owns the state, the conversation log and the pending
//! flag. Everything else talks to it through a [`SessionHandle`].

mod executor;


pub use executor::ChatRuntime;

use crate::answer::AnswerService;
use crate::conversation::{ConversationLog, Turn};
use crate::state_machine::ChatContext;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch, RwLock};

/// Commands sent from a handle to the runtime
#[derive(Debug)]
pub enum Command {
    Submit {
        text: String,
        reply: oneshot::Sender<SubmitOutcome>,
    },
}

/// What happened to a submitted message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SubmitOutcome {
    /// User turn appended and request dispatched
    Accepted,
    /// Blank input, nothing happened
    Skipped,
    /// An exchange is already in flight
    Rejected,
}

/// Events sent to observers
#[derive(Debug, Clone)]
pub enum SessionEvent {
    TurnAppended { index: usize, turn: Turn },
    PendingChanged { pending: bool },
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
    pending_rx: watch::Receiver<bool>,
    log: Arc<RwLock<ConversationLog>>,
}

impl SessionHandle {
    /// Submit a message. Returns once the runtime has decided; for accepted
    /// messages the user turn is already in the log and pending is set.
    pub async fn submit(&self, text: impl Into<String>) -> SubmitOutcome {
        let (reply, outcome) = oneshot::channel();
        let command = Command::Submit {
            text: text.into(),
            reply,
        };
        if self.command_tx.send(command).await.is_err() {
            tracing::warn!("Session runtime is gone, dropping message");
            return SubmitOutcome::Rejected;
        }
        outcome.await.unwrap_or(SubmitOutcome::Rejected)
    }

    pub fn is_pending(&self) -> bool {
        *self.pending_rx.borrow()
    }

    /// Observable pending flag
    #[allow(dead_code)] // API completeness
    pub fn pending(&self) -> watch::Receiver<bool> {
        self.pending_rx.clone()
    }

    /// Wait until no exchange is in flight
    pub async fn wait_until_idle(&self) {
        let mut pending = self.pending_rx.clone();
        // Only fails if the runtime stopped, in which case nothing is pending either
        let _ = pending.wait_for(|pending| !*pending).await;
    }

    /// Read-only snapshot of the conversation log
    pub async fn snapshot(&self) -> ConversationLog {
        self.log.read().await.clone()
    }

    #[allow(dead_code)] // Used by tests
    pub async fn turns(&self) -> Vec<Turn> {
        self.log.read().await.all().to_vec()
    }

    #[allow(dead_code)] // Used by tests
    pub async fn turn_count(&self) -> usize {
        self.log.read().await.len()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.broadcast_tx.subscribe()
    }
}

/// Start a session runtime on the current tokio runtime
pub fn spawn_session<A>(service: A, context: ChatContext) -> SessionHandle
where
    A: AnswerService + 'static,
{
    let (command_tx, command_rx) = mpsc::channel(32);
    let (broadcast_tx, _) = broadcast::channel(128);
    let (pending_tx, pending_rx) = watch::channel(false);
    let log = Arc::new(RwLock::new(ConversationLog::new()));

    let runtime = ChatRuntime::new(
        context,
        service,
        Arc::clone(&log),
        command_rx,
        pending_tx,
        broadcast_tx.clone(),
    );
    tokio::spawn(runtime.run());

    SessionHandle {
        command_tx,
        broadcast_tx,
        pending_rx,
        log,
    }
}

//! Chat session runtime executor

use super::{Command, SessionEvent, SubmitOutcome};
use crate::answer::{AnswerService, ServiceErrorKind};
use crate::conversation::ConversationLog;
use crate::state_machine::{transition, ChatContext, ChatState, Effect, Event, TransitionError};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch, RwLock};

/// Generic session runtime that can work with any answer service
pub struct ChatRuntime<A>
where
    A: AnswerService + 'static,
{
    context: ChatContext,
    state: ChatState,
    service: Arc<A>,
    log: Arc<RwLock<ConversationLog>>,
    command_rx: mpsc::Receiver<Command>,
    /// Answer results fed back from request tasks
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    pending_tx: watch::Sender<bool>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
}

impl<A> ChatRuntime<A>
where
    A: AnswerService + 'static,
{
    pub fn new(
        context: ChatContext,
        service: A,
        log: Arc<RwLock<ConversationLog>>,
        command_rx: mpsc::Receiver<Command>,
        pending_tx: watch::Sender<bool>,
        broadcast_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel(8);
        Self {
            context,
            state: ChatState::Idle,
            service: Arc::new(service),
            log,
            command_rx,
            event_rx,
            event_tx,
            pending_tx,
            broadcast_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(endpoint = %self.service.endpoint(), top_k = self.context.top_k, "Starting chat runtime");

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(Command::Submit { text, reply }) => {
                        let outcome = match self.process_event(Event::user_submit(text)).await {
                            Ok(()) => SubmitOutcome::Accepted,
                            Err(TransitionError::EmptyInput) => SubmitOutcome::Skipped,
                            Err(e) => {
                                tracing::debug!(error = %e, "Message rejected");
                                SubmitOutcome::Rejected
                            }
                        };
                        let _ = reply.send(outcome);
                    }
                    // Every handle dropped
                    None => break,
                },
                Some(event) = self.event_rx.recv() => {
                    if let Err(e) = self.process_event(event).await {
                        tracing::error!(error = %e, "Error handling answer event");
                    }
                }
            }
        }

        tracing::info!("Chat runtime stopped");
    }

    async fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        if let Event::AnswerFailed { message, kind, .. } = &event {
            tracing::warn!(%message, ?kind, "Exchange failed, showing apology");
        }

        let result = transition(&self.state, &self.context, event)?;
        self.state = result.new_state;
        tracing::debug!(pending = self.state.is_pending(), effects = result.effects.len(), "Transition applied");

        for effect in result.effects {
            self.execute_effect(effect).await;
        }
        Ok(())
    }

    async fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendTurn { turn } => {
                let index = self.log.write().await.append(turn.clone());
                tracing::debug!(index, sender = ?turn.sender(), is_error = turn.is_error(), "Turn appended");
                let _ = self.broadcast_tx.send(SessionEvent::TurnAppended { index, turn });
            }

            Effect::SetPending { pending } => {
                self.pending_tx.send_replace(pending);
                let _ = self.broadcast_tx.send(SessionEvent::PendingChanged { pending });
            }

            Effect::RequestAnswer { query, k } => {
                let service = Arc::clone(&self.service);
                let event_tx = self.event_tx.clone();

                // Runs to completion; the runtime keeps serving commands meanwhile
                tokio::spawn(async move {
                    let request = tokio::spawn(async move { service.ask(&query, k).await });
                    let event = match request.await {
                        Ok(Ok(answer)) => Event::AnswerReceived {
                            answer,
                            at: Utc::now(),
                        },
                        Ok(Err(e)) => Event::AnswerFailed {
                            message: e.message,
                            kind: e.kind,
                            at: Utc::now(),
                        },
                        // A panicking service must still settle the exchange
                        Err(e) => Event::AnswerFailed {
                            message: format!("Answer task failed: {e}"),
                            kind: ServiceErrorKind::Internal,
                            at: Utc::now(),
                        },
                    };
                    if event_tx.send(event).await.is_err() {
                        tracing::debug!("Runtime stopped before the answer arrived");
                    }
                });
            }
        }
    }
}

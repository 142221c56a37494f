//! Buho chat - terminal client for a retrieval-backed answer service
//!
//! Sends each question to the remote answer service and keeps the exchange
//! as a threaded message log with per-answer sources.

mod answer;
mod conversation;
mod disclosure;
mod runtime;
mod state_machine;
mod terminal;

use answer::{AnswerConfig, HttpAnswerService, LoggingService};
use runtime::spawn_session;
use state_machine::ChatContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (stderr, stdout belongs to the conversation)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buho_chat=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Configuration
    let config = AnswerConfig::from_env();
    tracing::info!(base_url = %config.base_url, top_k = config.top_k, "Answer service configured");

    let service = LoggingService::new(HttpAnswerService::new(&config));
    let handle = spawn_session(service, ChatContext::new(config.top_k));

    // A question on the command line runs a single exchange
    let question = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if question.trim().is_empty() {
        terminal::TerminalView::new(handle).run().await?;
    } else {
        terminal::ask_once(&handle, &question).await?;
    }

    Ok(())
}

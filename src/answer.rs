//! Answer service abstraction
//!
//! One request per user turn to the remote answer-generation service, mapped
//! into either an [`Answer`] or a [`ServiceError`].

mod config;
mod error;
mod http;
mod types;

pub use config::AnswerConfig;
pub use error::{ServiceError, ServiceErrorKind};
pub use http::HttpAnswerService;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for answer providers
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Ask the service for an answer backed by at most `k` sources
    async fn ask(&self, query: &str, k: u32) -> Result<Answer, ServiceError>;

    /// Where requests are sent, for logging
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<T: AnswerService + ?Sized> AnswerService for Arc<T> {
    async fn ask(&self, query: &str, k: u32) -> Result<Answer, ServiceError> {
        (**self).ask(query, k).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

/// Logging wrapper for answer services
pub struct LoggingService<S> {
    inner: S,
}

impl<S: AnswerService> LoggingService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: AnswerService> AnswerService for LoggingService<S> {
    async fn ask(&self, query: &str, k: u32) -> Result<Answer, ServiceError> {
        let start = std::time::Instant::now();
        let result = self.inner.ask(query, k).await;
        let duration = start.elapsed();

        match &result {
            Ok(answer) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    k,
                    citations = answer.citations.len(),
                    "Answer request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Answer request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}

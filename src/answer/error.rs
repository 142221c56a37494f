//! Answer service error types

use thiserror::Error;

/// Failure to obtain a usable answer
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Network, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Status, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Malformed, message)
    }
}

/// Error classification, for logs only. Every kind renders the same apology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// Connection refused, reset, DNS, transport timeout
    Network,
    /// Service answered with a non-2xx status
    Status,
    /// Body could not be decoded into an answer
    Malformed,
    /// The request task died before producing a result
    Internal,
}

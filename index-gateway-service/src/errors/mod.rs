//! Error types for the index gateway service.

use index_gateway_repository::IndexError;
use thiserror::Error;

/// Errors that can occur while serving a gateway operation.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request was rejected before reaching any backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The indexing, search or storage layer failed.
    #[error("Upstream error: {0}")]
    Upstream(#[from] IndexError),

    /// A backend call did not complete in time.
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },

    /// A queue backend failed to report its size.
    #[error("Queue backend {endpoint} failed: {message}")]
    QueueBackend { endpoint: String, message: String },
}

impl GatewayError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(operation: &'static str, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation,
            timeout_ms,
        }
    }

    /// Create a queue backend error.
    pub fn queue_backend(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QueueBackend {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

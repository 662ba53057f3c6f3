//! Inbound request types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::commit::CommitWindow;

/// Request-scoped identifier attached to every log line for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CorrelationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Request to rebuild the index document for one repository object.
#[derive(Debug, Clone)]
pub struct ReindexRequest {
    /// Opaque external identifier of the object.
    pub object_id: String,
    /// Caller's commit window.
    pub commit_window: CommitWindow,
    pub correlation_id: CorrelationId,
}

impl ReindexRequest {
    /// Create a request with a fresh correlation id.
    pub fn new(object_id: impl Into<String>, commit_within_ms: Option<u64>) -> Self {
        Self {
            object_id: object_id.into(),
            commit_window: CommitWindow::new(commit_within_ms),
            correlation_id: CorrelationId::new(),
        }
    }

    /// Use an existing correlation id, e.g. one propagated by the caller.
    pub fn with_correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = correlation_id;
        self
    }
}

/// Request to remove one object's document from the index.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    /// Opaque external identifier of the object.
    pub object_id: String,
    /// Caller's commit window.
    pub commit_window: CommitWindow,
    pub correlation_id: CorrelationId,
}

impl DeleteRequest {
    /// Create a request with a fresh correlation id.
    pub fn new(object_id: impl Into<String>, commit_within_ms: Option<u64>) -> Self {
        Self {
            object_id: object_id.into(),
            commit_window: CommitWindow::new(commit_within_ms),
            correlation_id: CorrelationId::new(),
        }
    }

    /// Use an existing correlation id, e.g. one propagated by the caller.
    pub fn with_correlation_id(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = correlation_id;
        self
    }
}

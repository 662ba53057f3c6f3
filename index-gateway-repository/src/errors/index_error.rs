//! Index error types.
//!
//! This module defines the errors raised by the external indexing
//! collaborators: the object loader, the transformer and the search index.

use thiserror::Error;

/// Errors that can occur while loading, transforming or indexing an object.
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    /// The object does not exist in the backing repository.
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// Failed to establish a connection to a backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Loading the object from the repository failed.
    #[error("Load error: {0}")]
    LoadError(String),

    /// Turning the object into an index document failed.
    #[error("Transform error: {0}")]
    TransformError(String),

    /// Writing a document to the index failed.
    #[error("Write error: {0}")]
    WriteError(String),

    /// Deleting a document from the index failed.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// The explicit commit failed.
    #[error("Commit error: {0}")]
    CommitError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse a backend response.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl IndexError {
    /// Create an object not found error.
    pub fn object_not_found(object_id: &str) -> Self {
        Self::ObjectNotFound(object_id.to_string())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a load error.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::LoadError(msg.into())
    }

    /// Create a transform error.
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::TransformError(msg.into())
    }

    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::WriteError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a commit error.
    pub fn commit(msg: impl Into<String>) -> Self {
        Self::CommitError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Whether this is the distinct "object does not exist" signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound(_))
    }
}

//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, mock, etc.).

use async_trait::async_trait;

use crate::errors::IndexError;
use index_gateway_shared::IndexedDocument;

/// Abstracts the underlying search index implementation.
///
/// Writes are not guaranteed to be visible to searches until the index's own
/// commit window elapses or [`commit`](SearchIndexProvider::commit) is called.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Write a document, replacing any existing document with the same id.
    ///
    /// # Arguments
    ///
    /// * `document` - The document to write
    /// * `commit_within_ms` - Window within which the index should make the write visible
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was written
    /// * `Err(IndexError)` - If the write fails
    async fn write_document(
        &self,
        document: &IndexedDocument,
        commit_within_ms: u64,
    ) -> Result<(), IndexError>;

    /// Delete the document for `object_id`.
    ///
    /// # Arguments
    ///
    /// * `object_id` - The identifier of the document to delete
    /// * `commit_within_ms` - Window within which the index should make the delete visible
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was deleted (or, depending on the backend, didn't exist)
    /// * `Err(IndexError)` - If the deletion fails
    async fn delete_by_id(&self, object_id: &str, commit_within_ms: u64) -> Result<(), IndexError>;

    /// Synchronously make all pending writes visible.
    async fn commit(&self) -> Result<(), IndexError>;

    /// Ensure the index exists with proper settings.
    ///
    /// Called once during startup.
    async fn ensure_index_exists(&self) -> Result<(), IndexError>;

    /// Check if the search index is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index is healthy
    /// * `Ok(false)` - If the index is unhealthy
    /// * `Err(IndexError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, IndexError>;
}

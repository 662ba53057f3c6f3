//! Reindex-by-identifier trait definition.

use async_trait::async_trait;

use crate::errors::IndexError;
use index_gateway_shared::{IndexAttributes, IndexedDocument};

/// The external "reindex by identifier" operation.
///
/// An implementation loads the object, transforms it and writes the resulting
/// document to the index. It logs through `tracing`, so every event it emits
/// lands inside the caller's span and carries the caller's correlation id.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// request.
#[async_trait]
pub trait ObjectIndexer: Send + Sync {
    /// Rebuild the index document for `object_id`.
    ///
    /// # Arguments
    ///
    /// * `object_id` - The external identifier of the object
    /// * `attributes` - Write attributes, including the commit window
    ///
    /// # Returns
    ///
    /// * `Ok(IndexedDocument)` - The document that was written
    /// * `Err(IndexError::ObjectNotFound)` - If the object does not exist
    /// * `Err(IndexError)` - If loading, transforming or writing fails
    async fn reindex_by_identifier(
        &self,
        object_id: &str,
        attributes: &IndexAttributes,
    ) -> Result<IndexedDocument, IndexError>;
}

//! Object loading and transformation traits.

use async_trait::async_trait;

use crate::errors::IndexError;
use index_gateway_shared::{IndexedDocument, RepositoryObject};

/// Fetches a repository object by identifier from the backing store.
#[async_trait]
pub trait ObjectLoader: Send + Sync {
    /// Load the current state of `object_id`.
    ///
    /// Returns `IndexError::ObjectNotFound` when the store has no such object.
    async fn load(&self, object_id: &str) -> Result<RepositoryObject, IndexError>;
}

/// Converts a loaded object into an index document.
pub trait DocumentTransformer: Send + Sync {
    fn transform(&self, object: &RepositoryObject) -> Result<IndexedDocument, IndexError>;
}

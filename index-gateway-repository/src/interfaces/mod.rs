//! Interface definitions for the external indexing collaborators.
//!
//! These traits allow the gateway to be wired against OpenSearch and a
//! Fedora-style repository in production and against mocks in tests.

mod object_indexer;
mod object_loader;
mod search_index_provider;

pub use object_indexer::ObjectIndexer;
pub use object_loader::{DocumentTransformer, ObjectLoader};
pub use search_index_provider::SearchIndexProvider;

//! # Index Gateway Repository
//!
//! This crate defines the interfaces the gateway consumes from its external
//! collaborators (object loading, document transformation and the search
//! index) together with default implementations: an OpenSearch index
//! provider, an HTTP loader for a Fedora-style repository and a
//! property-copying transformer.

pub mod errors;
pub mod fedora;
pub mod indexer;
pub mod interfaces;
pub mod opensearch;
pub mod transformer;

pub use errors::IndexError;
pub use fedora::FedoraObjectLoader;
pub use indexer::LibraryIndexer;
pub use interfaces::{DocumentTransformer, ObjectIndexer, ObjectLoader, SearchIndexProvider};
pub use opensearch::OpenSearchClient;
pub use transformer::PropertyDocumentTransformer;

//! # Index Gateway Shared
//!
//! Shared types used across the index gateway crates: inbound requests,
//! commit windows, documents and queue endpoint descriptions.

pub mod commit;
pub mod document;
pub mod queue;
pub mod request;

pub use commit::{CommitWindow, IndexAttributes, DEFAULT_COMMIT_WITHIN_MS};
pub use document::{IndexedDocument, RepositoryObject};
pub use queue::{QueueEndpoint, QueueSize};
pub use request::{CorrelationId, DeleteRequest, ReindexRequest};

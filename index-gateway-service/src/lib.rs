//! # Index Gateway Service
//!
//! Orchestration for the index gateway:
//!
//! 1. **Commit policy**: decides whether a mutation is followed by an explicit commit
//! 2. **Gateway**: reindexes or deletes one object through the external indexer
//! 3. **Queue**: sums the pending-job counts reported by the queue backends

pub mod commit_policy;
pub mod errors;
pub mod gateway;
pub mod queue;

pub use commit_policy::{should_force_commit, CommitDecision};
pub use errors::GatewayError;
pub use gateway::{GatewayConfig, IndexingGateway, ReindexOutcome};
pub use queue::{HttpQueueSizeSource, QueueAggregator, QueueFailurePolicy, QueueSizeSource};

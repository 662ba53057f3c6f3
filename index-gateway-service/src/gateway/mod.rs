//! Indexing gateway.
//!
//! Drives the external reindex and delete operations for a single object and
//! applies the commit policy afterwards.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, info_span, warn, Instrument};

use crate::commit_policy::CommitDecision;
use crate::errors::GatewayError;
use index_gateway_repository::{IndexError, ObjectIndexer, SearchIndexProvider};
use index_gateway_shared::{DeleteRequest, IndexAttributes, IndexedDocument, ReindexRequest};


/// Configuration for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Upper bound for the index write and for the explicit commit, each.
    pub operation_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            operation_timeout: Duration::from_millis(5000),
        }
    }
}

/// Result of a reindex that reached the external indexer.
#[derive(Debug, Clone, PartialEq)]
pub enum ReindexOutcome {
    /// The document was written (and committed, if the policy required it).
    Indexed(IndexedDocument),
    /// The object does not exist in the backing store.
    NotFound,
}

/// Reindexes and deletes single objects.
///
/// Each call makes exactly one attempt against the external library. A
/// commit, when required, is issued only after the mutation completed.
pub struct IndexingGateway {
    indexer: Arc<dyn ObjectIndexer>,
    index: Arc<dyn SearchIndexProvider>,
    config: GatewayConfig,
}

impl IndexingGateway {
    /// Create a new gateway with the default configuration.
    pub fn new(indexer: Arc<dyn ObjectIndexer>, index: Arc<dyn SearchIndexProvider>) -> Self {
        Self::with_config(indexer, index, GatewayConfig::default())
    }

    /// Create a new gateway with custom configuration.
    pub fn with_config(
        indexer: Arc<dyn ObjectIndexer>,
        index: Arc<dyn SearchIndexProvider>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            indexer,
            index,
            config,
        }
    }

    /// Rebuild the index document for the requested object.
    ///
    /// Returns `ReindexOutcome::NotFound` when the external loader reports the
    /// object missing; every other failure is returned as an error.
    pub async fn reindex(&self, request: &ReindexRequest) -> Result<ReindexOutcome, GatewayError> {
        validate_object_id(&request.object_id)?;
        let decision = CommitDecision::for_window(&request.commit_window);

        let span = info_span!(
            "reindex",
            correlation_id = %request.correlation_id,
            object_id = %request.object_id,
        );

        self.reindex_in_span(request, decision)
            .instrument(span)
            .await
    }

    /// Remove the requested object's document from the index.
    ///
    /// Returns the deleted identifier.
    pub async fn delete(&self, request: &DeleteRequest) -> Result<String, GatewayError> {
        validate_object_id(&request.object_id)?;
        let decision = CommitDecision::for_window(&request.commit_window);

        let span = info_span!(
            "delete",
            correlation_id = %request.correlation_id,
            object_id = %request.object_id,
        );

        self.delete_in_span(request, decision)
            .instrument(span)
            .await
    }

    /// Whether the search index is reachable and healthy.
    pub async fn health_check(&self) -> Result<bool, GatewayError> {
        self.bounded("health check", self.index.health_check())
            .await?
            .map_err(GatewayError::from)
    }

    async fn reindex_in_span(
        &self,
        request: &ReindexRequest,
        decision: CommitDecision,
    ) -> Result<ReindexOutcome, GatewayError> {
        info!(
            commit_within_ms = decision.commit_within_ms,
            force_commit = decision.force_commit,
            "Reindexing object"
        );

        let attributes = IndexAttributes::from(&request.commit_window);
        let written = self
            .bounded(
                "index write",
                self.indexer
                    .reindex_by_identifier(&request.object_id, &attributes),
            )
            .await?;

        let document = match written {
            Ok(document) => document,
            Err(e) if e.is_not_found() => {
                warn!("Object does not exist in the repository");
                return Ok(ReindexOutcome::NotFound);
            }
            Err(e) => {
                error!(error = %e, "Reindex failed");
                return Err(e.into());
            }
        };

        self.commit_if_required(decision).await?;

        info!("Reindex complete");
        Ok(ReindexOutcome::Indexed(document))
    }

    async fn delete_in_span(
        &self,
        request: &DeleteRequest,
        decision: CommitDecision,
    ) -> Result<String, GatewayError> {
        info!(
            commit_within_ms = decision.commit_within_ms,
            force_commit = decision.force_commit,
            "Deleting object from index"
        );

        self.bounded(
            "index delete",
            self.index
                .delete_by_id(&request.object_id, decision.commit_within_ms),
        )
        .await?
        .map_err(|e| {
            error!(error = %e, "Delete failed");
            GatewayError::from(e)
        })?;

        self.commit_if_required(decision).await?;

        info!("Delete complete");
        Ok(request.object_id.clone())
    }

    async fn commit_if_required(&self, decision: CommitDecision) -> Result<(), GatewayError> {
        if !decision.force_commit {
            return Ok(());
        }

        self.bounded("index commit", self.index.commit())
            .await?
            .map_err(|e| {
                error!(error = %e, "Commit failed");
                GatewayError::from(e)
            })
    }

    /// Run `operation` under the configured timeout.
    ///
    /// The inner result is returned untouched so callers can tell a missing
    /// object apart from other failures.
    async fn bounded<T, F>(
        &self,
        operation: &'static str,
        future: F,
    ) -> Result<Result<T, IndexError>, GatewayError>
    where
        F: Future<Output = Result<T, IndexError>>,
    {
        let timeout = self.config.operation_timeout;
        tokio::time::timeout(timeout, future).await.map_err(|_| {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            error!(operation, timeout_ms, "Operation timed out");
            GatewayError::timeout(operation, timeout_ms)
        })
    }
}

fn validate_object_id(object_id: &str) -> Result<(), GatewayError> {
    if object_id.trim().is_empty() {
        return Err(GatewayError::validation("object_id is required"));
    }
    Ok(())
}

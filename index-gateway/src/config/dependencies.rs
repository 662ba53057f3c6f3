//! Dependency initialization and wiring for the index gateway.

use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::http::AppState;
use crate::AppError;
use index_gateway_repository::{
    FedoraObjectLoader, LibraryIndexer, OpenSearchClient, PropertyDocumentTransformer,
    SearchIndexProvider,
};
use index_gateway_service::{GatewayConfig, HttpQueueSizeSource, IndexingGateway, QueueAggregator};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared state handed to the HTTP router.
    pub state: AppState,
}

impl Dependencies {
    /// Initialize all dependencies from the loaded configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If initialization fails
    pub async fn new(config: &AppConfig) -> Result<Self, AppError> {
        info!(
            opensearch_url = %config.opensearch_url,
            index = %config.index.alias,
            fedora_url = %config.fedora_url,
            queue_endpoints = config.queue_endpoints.len(),
            queue_failure_policy = %config.queue_failure_policy,
            "Initializing dependencies"
        );

        // Initialize OpenSearch client
        let search_client = OpenSearchClient::new(&config.opensearch_url, config.index.clone())
            .map_err(|e| AppError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        // Verify OpenSearch is reachable
        let healthy = search_client
            .health_check()
            .await
            .map_err(|e| AppError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(AppError::config("OpenSearch cluster is unhealthy"));
        }

        search_client.ensure_index_exists().await?;

        info!("OpenSearch connection verified");

        let search_client: Arc<dyn SearchIndexProvider> = Arc::new(search_client);

        let loader = FedoraObjectLoader::new(&config.fedora_url, config.request_timeout)
            .map_err(|e| AppError::config(format!("Failed to create repository loader: {}", e)))?;

        let indexer = LibraryIndexer::new(
            Arc::new(loader),
            Arc::new(PropertyDocumentTransformer::new()),
            search_client.clone(),
        );

        let gateway = IndexingGateway::with_config(
            Arc::new(indexer),
            search_client,
            GatewayConfig {
                operation_timeout: config.request_timeout,
            },
        );

        let queue_source = HttpQueueSizeSource::new(config.queue_timeout)
            .map_err(|e| AppError::config(format!("Failed to create queue HTTP client: {}", e)))?;

        let queues = QueueAggregator::new(
            config.queue_endpoints.clone(),
            Arc::new(queue_source),
            config.queue_failure_policy,
            config.queue_timeout,
        );

        Ok(Self {
            state: AppState::new(gateway, queues),
        })
    }
}

//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts, IndicesRefreshParts},
    params::Refresh,
    DeleteParts, IndexParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::IndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use index_gateway_shared::IndexedDocument;

/// OpenSearch client implementation.
///
/// OpenSearch has no per-request commit window. Writes are sent with
/// `refresh=false` and become visible on the index's `refresh_interval`
/// (see [`IndexConfig`]); [`commit`](SearchIndexProvider::commit) issues an
/// explicit refresh.
///
/// # Example
///
/// ```ignore
/// use index_gateway_repository::opensearch::IndexConfig;
/// let client = OpenSearchClient::new("http://localhost:9200", IndexConfig::default())?;
///
/// client.delete_by_id("demo:1", 1000).await?;
/// client.commit().await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index name and refresh interval
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(IndexError)` - If connection setup fails
    pub fn new(url: &str, index_config: IndexConfig) -> Result<Self, IndexError> {
        let parsed_url = Url::parse(url).map_err(|e| IndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| IndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            alias = %index_config.alias,
            refresh_interval_ms = index_config.refresh_interval_ms,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    pub fn index_config(&self) -> &IndexConfig {
        &self.index_config
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    #[instrument(skip(self, document), fields(doc_id = %document.id))]
    async fn write_document(
        &self,
        document: &IndexedDocument,
        commit_within_ms: u64,
    ) -> Result<(), IndexError> {
        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.alias, &document.id))
            .refresh(Refresh::False)
            .body(document.to_source())
            .send()
            .await
            .map_err(|e| IndexError::write(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(IndexError::write(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(commit_within_ms, "Document written");
        Ok(())
    }

    /// Delete a document from the search index.
    ///
    /// A 404 from OpenSearch means the document wasn't indexed; that is
    /// reported as success.
    #[instrument(skip(self))]
    async fn delete_by_id(&self, object_id: &str, commit_within_ms: u64) -> Result<(), IndexError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(&self.index_config.alias, object_id))
            .refresh(Refresh::False)
            .send()
            .await
            .map_err(|e| IndexError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(IndexError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!("Document deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn commit(&self) -> Result<(), IndexError> {
        let alias = self.index_config.alias.as_str();
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[alias]))
            .send()
            .await
            .map_err(|e| IndexError::commit(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Refresh request failed");
            return Err(IndexError::commit(format!(
                "Refresh failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(alias = %alias, "Index refreshed");
        Ok(())
    }

    async fn ensure_index_exists(&self) -> Result<(), IndexError> {
        let alias = self.index_config.alias.as_str();
        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[alias]))
            .send()
            .await
            .map_err(|e| IndexError::connection(e.to_string()))?;

        if exists.status_code().is_success() {
            debug!(alias = %alias, "Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(alias))
            .body(get_index_settings(&self.index_config))
            .send()
            .await
            .map_err(|e| IndexError::IndexCreationError(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            // Another instance may have created it between the two calls
            if error_body.contains("resource_already_exists_exception") {
                return Ok(());
            }
            return Err(IndexError::IndexCreationError(format!(
                "Create index failed with status {}: {}",
                status, error_body
            )));
        }

        info!(alias = %alias, "Created search index");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, IndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| IndexError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| IndexError::parse(e.to_string()))?;

        Ok(is_healthy_status(&body))
    }
}

/// Green and yellow clusters can serve writes.
fn is_healthy_status(body: &Value) -> bool {
    matches!(
        body.get("status").and_then(Value::as_str),
        Some("green") | Some("yellow")
    )
}

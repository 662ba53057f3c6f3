//! Sources of per-backend queue sizes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::GatewayError;
use index_gateway_shared::{QueueEndpoint, QueueSize};

/// Asks one queue backend how many items are pending.
#[async_trait]
pub trait QueueSizeSource: Send + Sync {
    /// Query the backend behind `endpoint`.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - The backend's reported size
    /// * `Err(GatewayError::QueueBackend)` - If the backend is unreachable or
    ///   its response can't be parsed
    async fn query_size(&self, endpoint: &QueueEndpoint) -> Result<u64, GatewayError>;
}

/// Queries `GET {size_url}` and reads the `value` field of the JSON body.
pub struct HttpQueueSizeSource {
    client: Client,
}

impl HttpQueueSizeSource {
    /// Create a source whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl QueueSizeSource for HttpQueueSizeSource {
    async fn query_size(&self, endpoint: &QueueEndpoint) -> Result<u64, GatewayError> {
        let url = endpoint.size_url.as_str();

        let response = self
            .client
            .get(endpoint.size_url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| GatewayError::queue_backend(url, e.to_string()))?;

        let size: QueueSize = response
            .json()
            .await
            .map_err(|e| GatewayError::queue_backend(url, format!("unparsable response: {}", e)))?;

        debug!(endpoint = %url, value = size.value, "Queried queue size");
        Ok(size.value)
    }
}

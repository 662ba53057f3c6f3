//! HTTP object loader for a Fedora-style repository.
//!
//! Objects are fetched from `{base_url}/{object_id}` as a JSON map of
//! properties. A 404 is the store's way of saying the object doesn't exist.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::errors::IndexError;
use crate::interfaces::ObjectLoader;
use index_gateway_shared::RepositoryObject;

/// Loads repository objects over HTTP.
pub struct FedoraObjectLoader {
    client: Client,
    base_url: Url,
}

impl FedoraObjectLoader {
    /// Create a loader for the repository at `base_url`.
    ///
    /// `timeout` bounds each request, including reading the body.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, IndexError> {
        let base_url = Url::parse(base_url).map_err(|e| IndexError::connection(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(IndexError::connection(format!(
                "Repository URL cannot be a base: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndexError::connection(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Build the URL for an object, escaping the identifier as one path segment.
    fn object_url(&self, object_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(object_id);
        }
        url
    }
}

#[async_trait]
impl ObjectLoader for FedoraObjectLoader {
    #[instrument(skip(self))]
    async fn load(&self, object_id: &str) -> Result<RepositoryObject, IndexError> {
        let url = self.object_url(object_id);

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| IndexError::load(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(url = %url, "Object not found in repository");
            return Err(IndexError::object_not_found(object_id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = %status, body = %body, "Repository request failed");
            return Err(IndexError::load(format!(
                "Repository returned status {} for {}",
                status, object_id
            )));
        }

        let properties: Map<String, Value> = response.json().await.map_err(|e| {
            IndexError::parse(format!("Invalid object body for {}: {}", object_id, e))
        })?;

        Ok(RepositoryObject {
            id: object_id.to_string(),
            properties,
        })
    }
}

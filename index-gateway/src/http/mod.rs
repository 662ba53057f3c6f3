//! HTTP routes for the index gateway.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{CommitParams, NOT_FOUND_MESSAGE};

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderName};
use axum::routing::{delete, get};
use axum::Router;

use index_gateway_service::{IndexingGateway, QueueAggregator};
use index_gateway_shared::CorrelationId;

/// Header carrying the request's correlation id, inbound and outbound.
pub const CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<IndexingGateway>,
    pub queues: Arc<QueueAggregator>,
}

impl AppState {
    pub fn new(gateway: IndexingGateway, queues: QueueAggregator) -> Self {
        Self {
            gateway: Arc::new(gateway),
            queues: Arc::new(queues),
        }
    }
}

/// Build the router with every gateway route.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/reindex/{object_id}",
            get(handlers::reindex)
                .post(handlers::reindex)
                .put(handlers::reindex),
        )
        .route("/index/{object_id}", delete(handlers::delete_object))
        .route("/queue/size", get(handlers::queue_size))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Reuse the caller's correlation id when it sent a valid one.
fn correlation_id(headers: &HeaderMap) -> CorrelationId {
    headers
        .get(&CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_correlation_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CORRELATION_ID_HEADER,
            HeaderValue::from_static("550e8400-e29b-41d4-a716-446655440000"),
        );

        assert_eq!(
            correlation_id(&headers).to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_invalid_correlation_header_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(CORRELATION_ID_HEADER, HeaderValue::from_static("not-a-uuid"));

        let id = correlation_id(&headers);
        assert_ne!(id.to_string(), "not-a-uuid");
    }
}

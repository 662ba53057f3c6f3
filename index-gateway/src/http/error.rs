//! Mapping of gateway errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use super::CORRELATION_ID_HEADER;
use index_gateway_service::GatewayError;
use index_gateway_shared::CorrelationId;

/// A failed request. Internal detail is logged, never returned to the caller.
#[derive(Debug)]
pub struct ApiError {
    pub error: GatewayError,
    pub correlation_id: CorrelationId,
}

impl ApiError {
    pub fn new(error: GatewayError, correlation_id: CorrelationId) -> Self {
        Self {
            error,
            correlation_id,
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.error {
            GatewayError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            GatewayError::Timeout { .. } => (
                StatusCode::GATEWAY_TIMEOUT,
                "Upstream request timed out".to_string(),
            ),
            GatewayError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            GatewayError::QueueBackend { .. } => (
                StatusCode::BAD_GATEWAY,
                "Queue backend unavailable".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        error!(
            correlation_id = %self.correlation_id,
            status = status.as_u16(),
            error = %self.error,
            "Request failed"
        );

        (
            status,
            [(CORRELATION_ID_HEADER, self.correlation_id.to_string())],
            message,
        )
            .into_response()
    }
}

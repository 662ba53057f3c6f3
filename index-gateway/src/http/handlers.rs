//! Route handlers.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{info_span, Instrument};

use super::{correlation_id, ApiError, AppState, CORRELATION_ID_HEADER};
use index_gateway_service::{GatewayError, ReindexOutcome};
use index_gateway_shared::{CorrelationId, DeleteRequest, ReindexRequest};

/// Body returned when the repository has no such object.
pub const NOT_FOUND_MESSAGE: &str = "Object does not exist in Fedora.";

/// Optional commit window, in milliseconds.
///
/// Read from the query string and from an `application/x-www-form-urlencoded`
/// body. The query string wins when both carry a value.
#[derive(Debug, Default, Deserialize)]
pub struct CommitParams {
    #[serde(rename = "commitWithin")]
    pub commit_within: Option<u64>,
}

fn invalid_commit_within(detail: String, correlation_id: CorrelationId) -> ApiError {
    ApiError::new(
        GatewayError::validation(format!("Invalid commitWithin: {}", detail)),
        correlation_id,
    )
}

fn parse_commit_within(
    query: Result<Query<CommitParams>, QueryRejection>,
    form: Result<Form<CommitParams>, FormRejection>,
    correlation_id: CorrelationId,
) -> Result<Option<u64>, ApiError> {
    let from_query = match query {
        Ok(Query(params)) => params.commit_within,
        Err(rejection) => return Err(invalid_commit_within(rejection.body_text(), correlation_id)),
    };

    let from_body = match form {
        Ok(Form(params)) => params.commit_within,
        // No form body was sent.
        Err(FormRejection::InvalidFormContentType(_)) => None,
        Err(rejection) => return Err(invalid_commit_within(rejection.body_text(), correlation_id)),
    };

    Ok(from_query.or(from_body))
}

fn respond(status: StatusCode, correlation_id: CorrelationId, body: impl IntoResponse) -> Response {
    (
        status,
        [(CORRELATION_ID_HEADER, correlation_id.to_string())],
        body,
    )
        .into_response()
}

/// `GET|POST|PUT /reindex/{object_id}`
pub async fn reindex(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
    headers: HeaderMap,
    query: Result<Query<CommitParams>, QueryRejection>,
    form: Result<Form<CommitParams>, FormRejection>,
) -> Result<Response, ApiError> {
    let correlation_id = correlation_id(&headers);
    let commit_within = parse_commit_within(query, form, correlation_id)?;
    let request =
        ReindexRequest::new(object_id, commit_within).with_correlation_id(correlation_id);

    match state.gateway.reindex(&request).await {
        Ok(ReindexOutcome::Indexed(_)) => Ok(respond(
            StatusCode::OK,
            correlation_id,
            format!("Successfully updated index for {}", request.object_id),
        )),
        Ok(ReindexOutcome::NotFound) => Ok(respond(
            StatusCode::NOT_FOUND,
            correlation_id,
            NOT_FOUND_MESSAGE,
        )),
        Err(e) => Err(ApiError::new(e, correlation_id)),
    }
}

/// `DELETE /index/{object_id}`
pub async fn delete_object(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
    headers: HeaderMap,
    query: Result<Query<CommitParams>, QueryRejection>,
    form: Result<Form<CommitParams>, FormRejection>,
) -> Result<Response, ApiError> {
    let correlation_id = correlation_id(&headers);
    let commit_within = parse_commit_within(query, form, correlation_id)?;
    let request =
        DeleteRequest::new(object_id, commit_within).with_correlation_id(correlation_id);

    let deleted = state
        .gateway
        .delete(&request)
        .await
        .map_err(|e| ApiError::new(e, correlation_id))?;

    Ok(respond(StatusCode::OK, correlation_id, deleted))
}

/// `GET /queue/size`
pub async fn queue_size(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let correlation_id = correlation_id(&headers);
    let span = info_span!("queue_size", correlation_id = %correlation_id);

    let size = state
        .queues
        .queue_size()
        .instrument(span)
        .await
        .map_err(|e| ApiError::new(e, correlation_id))?;

    Ok(respond(StatusCode::OK, correlation_id, Json(size)))
}

/// `GET /health`
pub async fn health(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let correlation_id = correlation_id(&headers);

    let healthy = state
        .gateway
        .health_check()
        .await
        .map_err(|e| ApiError::new(e, correlation_id))?;

    if healthy {
        Ok(respond(StatusCode::OK, correlation_id, "OK"))
    } else {
        Ok(respond(
            StatusCode::SERVICE_UNAVAILABLE,
            correlation_id,
            "Unavailable",
        ))
    }
}

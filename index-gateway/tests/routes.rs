//! Route-level tests against the full router with in-memory collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{Map, Value};
use tower::ServiceExt;

use index_gateway::http::{router, AppState, CORRELATION_ID_HEADER, NOT_FOUND_MESSAGE};
use index_gateway_repository::{IndexError, ObjectIndexer, SearchIndexProvider};
use index_gateway_service::{
    GatewayError, IndexingGateway, QueueAggregator, QueueFailurePolicy, QueueSizeSource,
};
use index_gateway_shared::{IndexAttributes, IndexedDocument, QueueEndpoint};

#[derive(Default)]
struct RecordingIndex {
    commits: AtomicUsize,
    windows: Mutex<Vec<u64>>,
    deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl SearchIndexProvider for RecordingIndex {
    async fn write_document(
        &self,
        _document: &IndexedDocument,
        commit_within_ms: u64,
    ) -> Result<(), IndexError> {
        self.windows.lock().unwrap().push(commit_within_ms);
        Ok(())
    }

    async fn delete_by_id(&self, object_id: &str, commit_within_ms: u64) -> Result<(), IndexError> {
        self.deleted.lock().unwrap().push(object_id.to_string());
        self.windows.lock().unwrap().push(commit_within_ms);
        Ok(())
    }

    async fn commit(&self) -> Result<(), IndexError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ensure_index_exists(&self) -> Result<(), IndexError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, IndexError> {
        Ok(true)
    }
}

/// Reindexes through the recording index; `missing` ids are reported absent
/// and `broken` ids fail with a write error.
struct StubIndexer {
    index: Arc<RecordingIndex>,
}

#[async_trait]
impl ObjectIndexer for StubIndexer {
    async fn reindex_by_identifier(
        &self,
        object_id: &str,
        attributes: &IndexAttributes,
    ) -> Result<IndexedDocument, IndexError> {
        match object_id {
            "missing" => Err(IndexError::object_not_found(object_id)),
            "broken" => Err(IndexError::write("cluster rejected bulk item")),
            _ => {
                let document = IndexedDocument::new(object_id, Map::new());
                self.index
                    .write_document(&document, attributes.commit_within_ms)
                    .await?;
                Ok(document)
            }
        }
    }
}

/// Reports a fixed size per endpoint host.
struct FixedSizes;

#[async_trait]
impl QueueSizeSource for FixedSizes {
    async fn query_size(&self, endpoint: &QueueEndpoint) -> Result<u64, GatewayError> {
        match endpoint.size_url.host_str() {
            Some("reindex.queue") => Ok(123),
            Some("delete.queue") => Ok(100),
            Some("batch.queue") => Ok(23),
            _ => Err(GatewayError::queue_backend(
                endpoint.size_url.as_str(),
                "connection refused",
            )),
        }
    }
}

fn endpoints(urls: &[&str]) -> Arc<[QueueEndpoint]> {
    urls.iter()
        .map(|u| QueueEndpoint::parse(u).unwrap())
        .collect::<Vec<_>>()
        .into()
}

fn app_with(index: Arc<RecordingIndex>, queue_urls: &[&str]) -> Router {
    let indexer = Arc::new(StubIndexer {
        index: index.clone(),
    });
    let gateway = IndexingGateway::new(indexer, index);
    let queues = QueueAggregator::new(
        endpoints(queue_urls),
        Arc::new(FixedSizes),
        QueueFailurePolicy::Strict,
        Duration::from_secs(1),
    );
    router(AppState::new(gateway, queues))
}

fn app(index: Arc<RecordingIndex>) -> Router {
    app_with(
        index,
        &[
            "http://reindex.queue/size",
            "http://delete.queue/size",
            "http://batch.queue/size",
        ],
    )
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn form_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_reindex_without_window_forces_commit() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index.clone())
        .oneshot(request(Method::POST, "/reindex/obj-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "Successfully updated index for obj-1"
    );
    assert_eq!(index.commits.load(Ordering::SeqCst), 1);
    assert_eq!(*index.windows.lock().unwrap(), vec![1000]);
}

#[tokio::test]
async fn test_reindex_with_window_defers_commit() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index.clone())
        .oneshot(request(Method::PUT, "/reindex/obj-1?commitWithin=5000"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(index.commits.load(Ordering::SeqCst), 0);
    assert_eq!(*index.windows.lock().unwrap(), vec![5000]);
}

#[tokio::test]
async fn test_reindex_window_in_form_body_defers_commit() {
    for method in [Method::POST, Method::PUT] {
        let index = Arc::new(RecordingIndex::default());

        let response = app(index.clone())
            .oneshot(form_request(method.clone(), "/reindex/obj-1", "commitWithin=5000"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{}", method);
        assert_eq!(index.commits.load(Ordering::SeqCst), 0, "{}", method);
        assert_eq!(*index.windows.lock().unwrap(), vec![5000], "{}", method);
    }
}

#[tokio::test]
async fn test_query_window_wins_over_form_body() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index.clone())
        .oneshot(form_request(
            Method::POST,
            "/reindex/obj-1?commitWithin=250",
            "commitWithin=5000",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(index.commits.load(Ordering::SeqCst), 0);
    assert_eq!(*index.windows.lock().unwrap(), vec![250]);
}

#[tokio::test]
async fn test_form_body_without_window_forces_commit() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index.clone())
        .oneshot(form_request(Method::POST, "/reindex/obj-1", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(index.commits.load(Ordering::SeqCst), 1);
    assert_eq!(*index.windows.lock().unwrap(), vec![1000]);
}

#[tokio::test]
async fn test_invalid_window_in_form_body_is_rejected() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index.clone())
        .oneshot(form_request(Method::PUT, "/reindex/obj-1", "commitWithin=-5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
    assert!(index.windows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_reindex_accepts_get() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index)
        .oneshot(request(Method::GET, "/reindex/obj-2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reindex_missing_object() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index.clone())
        .oneshot(request(Method::POST, "/reindex/missing"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, NOT_FOUND_MESSAGE);
    assert_eq!(index.commits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_reindex_failure_hides_detail() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index)
        .oneshot(request(Method::POST, "/reindex/broken"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert_eq!(body, "Internal server error");
    assert!(!body.contains("bulk item"));
}

#[tokio::test]
async fn test_invalid_commit_within_is_rejected() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index.clone())
        .oneshot(request(Method::POST, "/reindex/obj-1?commitWithin=soon"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
    assert!(index.windows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_returns_identifier() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index.clone())
        .oneshot(request(Method::DELETE, "/index/obj-9"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "obj-9");
    assert_eq!(*index.deleted.lock().unwrap(), vec!["obj-9".to_string()]);
    assert_eq!(index.commits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_delete_with_window_defers_commit() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index.clone())
        .oneshot(request(Method::DELETE, "/index/obj-9?commitWithin=250"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(index.commits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_delete_window_in_form_body_defers_commit() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index.clone())
        .oneshot(form_request(Method::DELETE, "/index/obj-9", "commitWithin=750"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(index.commits.load(Ordering::SeqCst), 0);
    assert_eq!(*index.windows.lock().unwrap(), vec![750]);
}

#[tokio::test]
async fn test_queue_size_sums_backends() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index)
        .oneshot(request(Method::GET, "/queue/size"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body, serde_json::json!({ "value": 246 }));
}

#[tokio::test]
async fn test_queue_size_with_unreachable_backend() {
    let index = Arc::new(RecordingIndex::default());

    let response = app_with(
        index,
        &["http://reindex.queue/size", "http://down.queue/size"],
    )
    .oneshot(request(Method::GET, "/queue/size"))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_text(response).await, "Queue backend unavailable");
}

#[tokio::test]
async fn test_correlation_id_is_echoed() {
    let index = Arc::new(RecordingIndex::default());
    let id = "550e8400-e29b-41d4-a716-446655440000";

    let response = app(index)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/reindex/obj-1")
                .header(CORRELATION_ID_HEADER, id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(CORRELATION_ID_HEADER).unwrap(),
        id
    );
}

#[tokio::test]
async fn test_health() {
    let index = Arc::new(RecordingIndex::default());

    let response = app(index)
        .oneshot(request(Method::GET, "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

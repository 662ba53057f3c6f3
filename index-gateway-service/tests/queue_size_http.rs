//! Queue aggregation against real HTTP backends bound on localhost.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use index_gateway_service::{GatewayError, HttpQueueSizeSource, QueueAggregator, QueueFailurePolicy};
use index_gateway_shared::QueueEndpoint;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn start_backend(value: u64) -> QueueEndpoint {
    let app = Router::new().route(
        "/size",
        get(move || async move { Json(json!({ "value": value })) }),
    );
    let base = serve(app).await;
    QueueEndpoint::parse(&format!("{}/size", base)).unwrap()
}

async fn start_broken_backend() -> QueueEndpoint {
    let app = Router::new()
        .route("/size", get(|| async { (StatusCode::OK, "garbage").into_response() }))
        .route("/down", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let base = serve(app).await;
    QueueEndpoint::parse(&format!("{}/size", base)).unwrap()
}

fn aggregator(endpoints: Vec<QueueEndpoint>, policy: QueueFailurePolicy) -> QueueAggregator {
    let source = HttpQueueSizeSource::new(Duration::from_secs(5)).unwrap();
    QueueAggregator::new(endpoints.into(), Arc::new(source), policy, Duration::from_secs(5))
}

#[tokio::test]
async fn test_two_backends_are_summed() {
    let endpoints = vec![start_backend(123).await, start_backend(123).await];

    let size = aggregator(endpoints, QueueFailurePolicy::Strict)
        .queue_size()
        .await
        .unwrap();

    assert_eq!(size.value, 246);
}

#[tokio::test]
async fn test_unparsable_backend_fails_strict_aggregate() {
    let broken = start_broken_backend().await;
    let broken_url = broken.size_url.to_string();
    let endpoints = vec![start_backend(5).await, broken];

    let err = aggregator(endpoints, QueueFailurePolicy::Strict)
        .queue_size()
        .await
        .unwrap_err();

    match err {
        GatewayError::QueueBackend { endpoint, .. } => assert_eq!(endpoint, broken_url),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_error_status_counts_as_zero_when_lenient() {
    let broken = start_broken_backend().await;
    let mut down = broken.clone();
    down.size_url.set_path("/down");
    let endpoints = vec![start_backend(40).await, down, start_backend(2).await];

    let size = aggregator(endpoints, QueueFailurePolicy::TreatAsZero)
        .queue_size()
        .await
        .unwrap();

    assert_eq!(size.value, 42);
}

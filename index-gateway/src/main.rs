//! Index Gateway
//!
//! Serves reindex, delete and queue depth requests over HTTP.

use tokio::net::TcpListener;
use tracing::{error, info};

use index_gateway::{http, logging, AppConfig, AppError, Dependencies};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The logger may not be installed yet.
        eprintln!("index-gateway failed: {}", e);
        error!(error = %e, "index-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _guard = logging::init_logging(&config.logging)?;

    info!(
        bind_addr = %config.bind_addr,
        opensearch_url = %config.opensearch_url,
        index = %config.index.alias,
        queue_endpoints = config.queue_endpoints.len(),
        queue_failure_policy = %config.queue_failure_policy,
        "Starting index-gateway"
    );

    let dependencies = Dependencies::new(&config).await?;
    let app = http::router(dependencies.state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("index-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}

//! Structured logging setup.
//!
//! Lines go to stdout and, when a log directory is configured, to a rolling
//! file. Every line carries a UTC timestamp in the configured format.

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::AppError;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn,opensearch=warn";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let timer = ChronoUtc::new(config.timestamp_format.clone());

    let stdout = if config.json {
        fmt::layer()
            .json()
            .with_timer(timer.clone())
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_timer(timer.clone())
            .with_target(true)
            .boxed()
    };

    let (file, guard) = match &config.directory {
        Some(directory) => {
            let appender = RollingFileAppender::builder()
                .rotation(config.rotation.as_rotation())
                .filename_prefix(&config.file_prefix)
                .build(directory)
                .map_err(|e| {
                    AppError::config(format!(
                        "Failed to open log directory {}: {}",
                        directory.display(),
                        e
                    ))
                })?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = if config.json {
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_timer(timer)
                    .boxed()
            } else {
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_timer(timer)
                    .boxed()
            };
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout)
        .with(file)
        .try_init()
        .map_err(|e| AppError::config(format!("Failed to install logger: {}", e)))?;

    info!(
        directory = ?config.directory,
        rotation = ?config.rotation,
        json = config.json,
        "Logging initialized"
    );
    Ok(guard)
}

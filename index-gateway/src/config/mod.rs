//! Configuration for the index gateway.
//!
//! Everything is read from environment variables once at startup (after
//! `.env` has been loaded) into an immutable [`AppConfig`].

mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use tracing_appender::rolling::Rotation;

use crate::AppError;
use index_gateway_repository::opensearch::{IndexConfig, DEFAULT_INDEX_ALIAS};
use index_gateway_service::QueueFailurePolicy;
use index_gateway_shared::{QueueEndpoint, DEFAULT_COMMIT_WITHIN_MS};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default index name.

/// Default repository REST endpoint.
const DEFAULT_FEDORA_URL: &str = "http://localhost:8080/rest";

/// Default timeout for index operations and queue queries.
const DEFAULT_TIMEOUT_MS: u64 = 5000;

const DEFAULT_LOG_FILE_PREFIX: &str = "index-gateway.log";

const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// How often the log file is rolled over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    pub fn as_rotation(self) -> Rotation {
        match self {
            Self::Minutely => Rotation::MINUTELY,
            Self::Hourly => Rotation::HOURLY,
            Self::Daily => Rotation::DAILY,
            Self::Never => Rotation::NEVER,
        }
    }
}

impl FromStr for LogRotation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minutely" => Ok(Self::Minutely),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "never" => Ok(Self::Never),
            other => Err(AppError::config(format!(
                "Invalid LOG_ROTATION '{}', expected minutely, hourly, daily or never",
                other
            ))),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Directory for rolling log files; stdout only when unset.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
    pub rotation: LogRotation,
    /// strftime-style format for the UTC timestamp on every line.
    pub timestamp_format: String,
    /// Emit JSON lines instead of plain text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: DEFAULT_LOG_FILE_PREFIX.to_string(),
            rotation: LogRotation::default(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            json: false,
        }
    }
}

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub opensearch_url: String,
    pub index: IndexConfig,
    pub fedora_url: String,
    /// All known queue backends.
    pub queue_endpoints: Arc<[QueueEndpoint]>,
    pub queue_failure_policy: QueueFailurePolicy,
    /// Bound for each index write and each explicit commit.
    pub request_timeout: Duration,
    /// Bound for each queue-size query.
    pub queue_timeout: Duration,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `BIND_ADDR`: listen address (default: 0.0.0.0:3000)
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `INDEX_ALIAS`: index name (default: objects)
    /// - `INDEX_REFRESH_INTERVAL_MS`: index refresh interval (default: 1000)
    /// - `FEDORA_URL`: repository REST endpoint (default: http://localhost:8080/rest)
    /// - `QUEUE_SIZE_URLS`: comma-separated queue size URLs (default: none)
    /// - `QUEUE_FAILURE_POLICY`: `strict` or `treat_as_zero` (default: strict)
    /// - `REQUEST_TIMEOUT_MS`, `QUEUE_TIMEOUT_MS`: timeouts (default: 5000)
    /// - `LOG_DIR`, `LOG_FILE_PREFIX`, `LOG_ROTATION`, `LOG_TIMESTAMP_FORMAT`, `LOG_JSON`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| AppError::config(format!("Invalid BIND_ADDR: {}", e)))?;

        let refresh_interval_ms =
            parse_u64(get("INDEX_REFRESH_INTERVAL_MS"), "INDEX_REFRESH_INTERVAL_MS")?
                .unwrap_or(DEFAULT_COMMIT_WITHIN_MS);
        let index = IndexConfig::new(
            get("INDEX_ALIAS").unwrap_or_else(|| DEFAULT_INDEX_ALIAS.to_string()),
            refresh_interval_ms,
        );

        let queue_endpoints = parse_queue_endpoints(get("QUEUE_SIZE_URLS").as_deref())?;

        let queue_failure_policy = match get("QUEUE_FAILURE_POLICY") {
            Some(value) => value.parse::<QueueFailurePolicy>().map_err(AppError::config)?,
            None => QueueFailurePolicy::default(),
        };

        let request_timeout = timeout(get("REQUEST_TIMEOUT_MS"), "REQUEST_TIMEOUT_MS")?;
        let queue_timeout = timeout(get("QUEUE_TIMEOUT_MS"), "QUEUE_TIMEOUT_MS")?;

        let logging = LoggingConfig {
            directory: get("LOG_DIR").map(PathBuf::from),
            file_prefix: get("LOG_FILE_PREFIX")
                .unwrap_or_else(|| DEFAULT_LOG_FILE_PREFIX.to_string()),
            rotation: match get("LOG_ROTATION") {
                Some(value) => value.parse()?,
                None => LogRotation::default(),
            },
            timestamp_format: validate_timestamp_format(
                get("LOG_TIMESTAMP_FORMAT").unwrap_or_else(|| DEFAULT_TIMESTAMP_FORMAT.to_string()),
            )?,
            json: parse_bool(get("LOG_JSON"), "LOG_JSON")?.unwrap_or(false),
        };

        Ok(Self {
            bind_addr,
            opensearch_url: get("OPENSEARCH_URL")
                .unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string()),
            index,
            fedora_url: get("FEDORA_URL").unwrap_or_else(|| DEFAULT_FEDORA_URL.to_string()),
            queue_endpoints,
            queue_failure_policy,
            request_timeout,
            queue_timeout,
            logging,
        })
    }
}

fn parse_queue_endpoints(raw: Option<&str>) -> Result<Arc<[QueueEndpoint]>, AppError> {
    let Some(raw) = raw else {
        return Ok(Arc::from(Vec::new()));
    };

    let endpoints = raw
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(|url| {
            let endpoint = QueueEndpoint::parse(url).map_err(|e| {
                AppError::config(format!("Invalid queue endpoint URL '{}': {}", url, e))
            })?;
            match endpoint.size_url.scheme() {
                "http" | "https" => Ok(endpoint),
                scheme => Err(AppError::config(format!(
                    "Queue endpoint '{}' has unsupported scheme '{}'",
                    url, scheme
                ))),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(endpoints.into())
}

fn parse_u64(value: Option<String>, key: &str) -> Result<Option<u64>, AppError> {
    value
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map_err(|e| AppError::config(format!("Invalid {}: {}", key, e)))
        })
        .transpose()
}

fn timeout(value: Option<String>, key: &str) -> Result<Duration, AppError> {
    let ms = parse_u64(value, key)?.unwrap_or(DEFAULT_TIMEOUT_MS);
    if ms == 0 {
        return Err(AppError::config(format!("{} must be greater than zero", key)));
    }
    Ok(Duration::from_millis(ms))
}

fn parse_bool(value: Option<String>, key: &str) -> Result<Option<bool>, AppError> {
    value
        .map(|v| match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(AppError::config(format!("Invalid {}: '{}'", key, other))),
        })
        .transpose()
}

fn validate_timestamp_format(format: String) -> Result<String, AppError> {
    if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
        return Err(AppError::config(format!(
            "Invalid LOG_TIMESTAMP_FORMAT '{}'",
            format
        )));
    }
    Ok(format)
}

//! Queue aggregator.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::errors::GatewayError;
use crate::queue::source::QueueSizeSource;
use index_gateway_shared::{QueueEndpoint, QueueSize};

/// What to do when some queue backends fail to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueFailurePolicy {
    /// Fail the whole aggregation; no partial sum is reported.
    #[default]
    Strict,
    /// Count the failing backend as zero and report the rest.
    TreatAsZero,
}

impl FromStr for QueueFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "treat_as_zero" | "zero" => Ok(Self::TreatAsZero),
            other => Err(format!(
                "Unknown queue failure policy '{}', expected 'strict' or 'treat_as_zero'",
                other
            )),
        }
    }
}

impl fmt::Display for QueueFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::TreatAsZero => f.write_str("treat_as_zero"),
        }
    }
}

/// Sums the pending-job counts of every configured queue backend.
///
/// All backends are queried concurrently and each query has its own timeout,
/// so one slow backend delays the answer by at most that timeout. Results are
/// never cached.
pub struct QueueAggregator {
    endpoints: Arc<[QueueEndpoint]>,
    source: Arc<dyn QueueSizeSource>,
    policy: QueueFailurePolicy,
    query_timeout: Duration,
}

impl QueueAggregator {
    pub fn new(
        endpoints: Arc<[QueueEndpoint]>,
        source: Arc<dyn QueueSizeSource>,
        policy: QueueFailurePolicy,
        query_timeout: Duration,
    ) -> Self {
        Self {
            endpoints,
            source,
            policy,
            query_timeout,
        }
    }

    /// Total number of pending items across all backends.
    pub async fn queue_size(&self) -> Result<QueueSize, GatewayError> {
        if self.endpoints.is_empty() {
            return Ok(QueueSize::new(0));
        }

        let queries = self.endpoints.iter().map(|endpoint| self.query_one(endpoint));
        let outcomes = join_all(queries).await;

        let mut total: u64 = 0;
        let mut failed = 0usize;
        for (endpoint, outcome) in self.endpoints.iter().zip(outcomes) {
            match outcome {
                Ok(value) => total = total.saturating_add(value),
                Err(e) => match self.policy {
                    QueueFailurePolicy::Strict => {
                        error!(
                            endpoint = %endpoint.size_url,
                            error = %e,
                            "Queue size query failed"
                        );
                        return Err(e);
                    }
                    QueueFailurePolicy::TreatAsZero => {
                        warn!(
                            endpoint = %endpoint.size_url,
                            error = %e,
                            "Queue size query failed, counting as zero"
                        );
                        failed += 1;
                    }
                },
            }
        }

        debug!(
            total,
            endpoints = self.endpoints.len(),
            failed,
            "Aggregated queue size"
        );
        Ok(QueueSize::new(total))
    }

    async fn query_one(&self, endpoint: &QueueEndpoint) -> Result<u64, GatewayError> {
        match tokio::time::timeout(self.query_timeout, self.source.query_size(endpoint)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::queue_backend(
                endpoint.size_url.as_str(),
                format!("timed out after {}ms", self.query_timeout.as_millis()),
            )),
        }
    }
}

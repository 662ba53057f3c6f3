//! Queue backend types.

use serde::{Deserialize, Serialize};
use url::Url;

/// A queue backend that reports its pending job count at `size_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEndpoint {
    pub size_url: Url,
}

impl QueueEndpoint {
    pub fn new(size_url: Url) -> Self {
        Self { size_url }
    }

    /// Parse an endpoint from a URL string.
    pub fn parse(size_url: &str) -> Result<Self, url::ParseError> {
        Url::parse(size_url.trim()).map(Self::new)
    }
}

/// Number of pending items, as reported by a backend or summed across them.
///
/// Serialises as `{ "value": <integer> }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSize {
    pub value: u64,
}

impl QueueSize {
    pub fn new(value: u64) -> Self {
        Self { value }
    }
}

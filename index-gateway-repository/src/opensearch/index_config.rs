//! OpenSearch index configuration and settings.

use serde_json::{json, Value};

use index_gateway_shared::DEFAULT_COMMIT_WITHIN_MS;

/// Default name of the search index.
pub const DEFAULT_INDEX_ALIAS: &str = "objects";

/// Index name and the refresh interval that acts as its deferred-commit window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    pub alias: String,
    /// How often OpenSearch makes pending writes visible, in milliseconds.
    pub refresh_interval_ms: u64,
}

impl IndexConfig {
    pub fn new(alias: impl Into<String>, refresh_interval_ms: u64) -> Self {
        Self {
            alias: alias.into(),
            refresh_interval_ms,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_ALIAS, DEFAULT_COMMIT_WITHIN_MS)
    }
}

/// Get the index settings and mappings used when creating the index.
///
/// Documents are keyed by the object identifier. Fields beyond `id` and
/// `indexed_at` are mapped dynamically since their shape is owned by the
/// document transformer.
pub fn get_index_settings(config: &IndexConfig) -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1,
            "refresh_interval": format!("{}ms", config.refresh_interval_ms)
        },
        "mappings": {
            "dynamic": true,
            "properties": {
                "id": {
                    "type": "keyword"
                },
                "indexed_at": {
                    "type": "date"
                }
            }
        }
    })
}

//! Repository object and index document types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An object as loaded from the backing repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryObject {
    /// The object's external identifier.
    pub id: String,
    /// Properties describing the object's current state.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl RepositoryObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: Map::new(),
        }
    }

    /// Add a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A document as written to the search index.
///
/// The `id` is the object's external identifier, so writing the same object
/// twice replaces the earlier document instead of adding a second one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedDocument {
    pub id: String,
    /// Indexed field values.
    pub fields: Map<String, Value>,
    /// When the document was produced.
    pub indexed_at: DateTime<Utc>,
}

impl IndexedDocument {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
            indexed_at: Utc::now(),
        }
    }

    /// The body sent to the search index: the fields plus `id` and `indexed_at`.
    pub fn to_source(&self) -> Value {
        let mut source = self.fields.clone();
        source.insert("id".to_string(), Value::String(self.id.clone()));
        source.insert(
            "indexed_at".to_string(),
            Value::String(self.indexed_at.to_rfc3339()),
        );
        Value::Object(source)
    }
}

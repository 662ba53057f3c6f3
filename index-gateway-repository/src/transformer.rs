//! Default document transformer.

use serde_json::{Map, Value};

use crate::errors::IndexError;
use crate::interfaces::DocumentTransformer;
use index_gateway_shared::{IndexedDocument, RepositoryObject};

/// Names that the index reserves for its own bookkeeping.
const RESERVED_FIELDS: [&str; 2] = ["id", "indexed_at"];

/// Copies an object's properties into document fields.
///
/// Null values and reserved names are dropped. Nested objects are kept as-is
/// and left to the index's dynamic mapping.
#[derive(Debug, Default, Clone)]
pub struct PropertyDocumentTransformer;

impl PropertyDocumentTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentTransformer for PropertyDocumentTransformer {
    fn transform(&self, object: &RepositoryObject) -> Result<IndexedDocument, IndexError> {
        if object.id.trim().is_empty() {
            return Err(IndexError::transform("Object has an empty identifier"));
        }

        let fields: Map<String, Value> = object
            .properties
            .iter()
            .filter(|(key, value)| !value.is_null() && !RESERVED_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(IndexedDocument::new(object.id.clone(), fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transform_copies_properties() {
        let object = RepositoryObject::new("demo:1")
            .with_property("title", "A title")
            .with_property("creator", json!(["a", "b"]));

        let doc = PropertyDocumentTransformer::new().transform(&object).unwrap();

        assert_eq!(doc.id, "demo:1");
        assert_eq!(doc.fields["title"], "A title");
        assert_eq!(doc.fields["creator"], json!(["a", "b"]));
    }

    #[test]
    fn test_transform_drops_nulls_and_reserved() {
        let object = RepositoryObject::new("demo:1")
            .with_property("id", "spoofed")
            .with_property("indexed_at", "yesterday")
            .with_property("description", Value::Null)
            .with_property("title", "kept");

        let doc = PropertyDocumentTransformer::new().transform(&object).unwrap();

        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.to_source()["id"], "demo:1");
    }

    #[test]
    fn test_transform_rejects_empty_id() {
        let result = PropertyDocumentTransformer::new().transform(&RepositoryObject::new(" "));
        assert!(matches!(result, Err(IndexError::TransformError(_))));
    }
}

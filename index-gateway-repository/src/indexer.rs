//! Default implementation of the reindex-by-identifier operation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::errors::IndexError;
use crate::interfaces::{DocumentTransformer, ObjectIndexer, ObjectLoader, SearchIndexProvider};
use index_gateway_shared::{IndexAttributes, IndexedDocument};

/// Load, transform and write, in that order.
///
/// Does not commit; commit timing belongs to the caller.
pub struct LibraryIndexer {
    loader: Arc<dyn ObjectLoader>,
    transformer: Arc<dyn DocumentTransformer>,
    index: Arc<dyn SearchIndexProvider>,
}

impl LibraryIndexer {
    pub fn new(
        loader: Arc<dyn ObjectLoader>,
        transformer: Arc<dyn DocumentTransformer>,
        index: Arc<dyn SearchIndexProvider>,
    ) -> Self {
        Self {
            loader,
            transformer,
            index,
        }
    }
}

#[async_trait]
impl ObjectIndexer for LibraryIndexer {
    #[instrument(skip(self, attributes), fields(commit_within_ms = attributes.commit_within_ms))]
    async fn reindex_by_identifier(
        &self,
        object_id: &str,
        attributes: &IndexAttributes,
    ) -> Result<IndexedDocument, IndexError> {
        let object = self.loader.load(object_id).await?;
        debug!(property_count = object.properties.len(), "Loaded object");

        let document = self.transformer.transform(&object)?;

        self.index
            .write_document(&document, attributes.commit_within_ms)
            .await?;

        info!(field_count = document.fields.len(), "Wrote index document");
        Ok(document)
    }
}

//! DocumentStorage - widgets as JSON objects in an object store
//!
//! Key layout: `{prefix}/{owner-slug}/{widgetId}`. The body is the request as
//! received, unknown fields included.
//!
//! The owner is part of the key. A delete that carries a different owner than
//! the create misses the stored object and still reports success, because the
//! store treats deleting a missing key as a no-op.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{StorageError, WidgetRequest, document_key};
use crate::ports::{JSON_CONTENT_TYPE, ObjectStore, WidgetStorage};

pub const DEFAULT_DOCUMENT_PREFIX: &str = "widgets";

const BACKEND: &str = "document";

pub struct DocumentStorage {
    store: Arc<dyn ObjectStore>,
    prefix: String,
}

impl DocumentStorage {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_prefix(store, DEFAULT_DOCUMENT_PREFIX)
    }

    pub fn with_prefix(store: Arc<dyn ObjectStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn key_for(&self, request: &WidgetRequest) -> String {
        document_key(&self.prefix, &request.owner, &request.widget_id)
    }
}

#[async_trait]
impl WidgetStorage for DocumentStorage {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn write(&self, request: &WidgetRequest) -> Result<(), StorageError> {
        let key = self.key_for(request);
        let body = serde_json::to_vec(request).map_err(|source| StorageError::Encode {
            widget_id: request.widget_id.clone(),
            source,
        })?;

        self.store
            .put(&key, body, JSON_CONTENT_TYPE)
            .await
            .map_err(|source| StorageError::Write {
                backend: BACKEND,
                widget_id: request.widget_id.clone(),
                source,
            })?;

        tracing::info!(key = %key, request_id = %request.request_id, "widget stored in document store");
        Ok(())
    }

    async fn delete(&self, request: &WidgetRequest) -> Result<(), StorageError> {
        let key = self.key_for(request);
        self.store
            .delete(&key)
            .await
            .map_err(|source| StorageError::Delete {
                backend: BACKEND,
                widget_id: request.widget_id.clone(),
                source,
            })?;

        tracing::info!(key = %key, request_id = %request.request_id, "widget deleted from document store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RequestKind, StoreError};
    use crate::impls::InMemoryObjectStore;
    use serde_json::{Value, json};

    fn storage(store: &InMemoryObjectStore) -> DocumentStorage {
        DocumentStorage::new(Arc::new(store.clone()))
    }

    fn create_request() -> WidgetRequest {
        WidgetRequest::new(RequestKind::Create, "r1", "w1", "Jane Doe")
            .with_label("L")
            .with_description("D")
            .with_attribute("color", "red")
    }

    #[tokio::test]
    async fn write_stores_request_json_under_owner_key() {
        let store = InMemoryObjectStore::new();
        storage(&store).write(&create_request()).await.unwrap();

        let object = store.object("widgets/jane-doe/w1").await.unwrap();
        assert_eq!(object.content_type, "application/json");
        let body: Value = serde_json::from_slice(&object.body).unwrap();
        assert_eq!(
            body,
            json!({
                "type": "create",
                "requestId": "r1",
                "widgetId": "w1",
                "owner": "Jane Doe",
                "label": "L",
                "description": "D",
                "otherAttributes": [{"name": "color", "value": "red"}]
            })
        );
    }

    #[tokio::test]
    async fn delete_with_matching_owner_removes_object() {
        let store = InMemoryObjectStore::new();
        let documents = storage(&store);
        documents.write(&create_request()).await.unwrap();

        let delete = WidgetRequest::new(RequestKind::Delete, "r2", "w1", "Jane Doe");
        documents.delete(&delete).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_with_other_owner_misses_object() {
        let store = InMemoryObjectStore::new();
        let documents = storage(&store);
        documents.write(&create_request()).await.unwrap();

        let delete = WidgetRequest::new(RequestKind::Delete, "r2", "w1", "John Doe");
        documents.delete(&delete).await.unwrap();
        assert_eq!(store.keys().await, vec!["widgets/jane-doe/w1".to_string()]);
    }

    #[tokio::test]
    async fn store_failure_becomes_write_error() {
        let store = InMemoryObjectStore::new();
        store.set_available(false);
        let err = storage(&store).write(&create_request()).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Write { backend: "document", source: StoreError::Unavailable(_), .. }
        ));
    }
}

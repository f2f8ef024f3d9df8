//! InMemoryObjectStore - object store for tests and local runs

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::StoreError;
use crate::ports::ObjectStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// InMemoryObjectStore keeps objects in a sorted map.
///
/// # Details
/// - `BTreeMap` so `list_first` returns the smallest matching key
/// - `set_available(false)` makes every call fail with `Unavailable`,
///   which is how tests simulate losing the bucket
#[derive(Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<Mutex<BTreeMap<String, StoredObject>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Snapshot of one object, content type included.
    pub async fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.lock().await.is_empty()
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list_first(&self, prefix: &str) -> Result<Option<String>, StoreError> {
        self.ensure_available()?;
        let objects = self.objects.lock().await;
        Ok(objects
            .range(prefix.to_string()..)
            .next()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(prefix))
            .cloned())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.ensure_available()?;
        self.objects
            .lock()
            .await
            .get(key)
            .map(|object| object.body.clone())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        self.ensure_available()?;
        self.objects.lock().await.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.ensure_available()?;
        self.objects.lock().await.remove(key);
        Ok(())
    }
}

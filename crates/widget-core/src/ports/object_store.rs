//! ObjectStore port - a flat, namespaced key/bytes store (S3-like)
//!
//! Used twice: as the request inbox and as the document backend.

use async_trait::async_trait;

use crate::domain::StoreError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// ObjectStore is the contract the consumer needs from an object store.
///
/// # Contract
/// - keys are `/`-separated strings
/// - `list_first` returns at most one key; which one is up to the store
/// - `delete` of a missing key succeeds
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Any one key under `prefix`, or `None` when nothing is stored there.
    async fn list_first(&self, prefix: &str) -> Result<Option<String>, StoreError>;

    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

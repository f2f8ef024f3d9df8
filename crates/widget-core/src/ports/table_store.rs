//! TableStore port - a key/value table of flat string rows (DynamoDB-like)

use async_trait::async_trait;

use crate::domain::{StoreError, TableItem};

/// TableStore keys every row by one column (`widget_id` for widgets).
///
/// # Contract
/// - `put_item` overwrites any row with the same key
/// - `delete_item` of a missing key succeeds
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn put_item(&self, item: TableItem) -> Result<(), StoreError>;

    async fn get_item(&self, key: &str) -> Result<Option<TableItem>, StoreError>;

    async fn delete_item(&self, key: &str) -> Result<(), StoreError>;
}

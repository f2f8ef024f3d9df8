//! InMemoryTableStore - table store for tests and local runs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{StoreError, TableItem, WIDGET_ID_COLUMN};
use crate::ports::TableStore;

/// InMemoryTableStore keeps rows in a `HashMap` keyed by the key column.
#[derive(Clone)]
pub struct InMemoryTableStore {
    key_column: String,
    rows: Arc<Mutex<HashMap<String, TableItem>>>,
}

impl InMemoryTableStore {
    /// A table keyed by `widget_id`.
    pub fn new() -> Self {
        Self::with_key_column(WIDGET_ID_COLUMN)
    }

    pub fn with_key_column(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            rows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.lock().await.is_empty()
    }
}

impl Default for InMemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Key value of a row, or `InvalidKey` when the key column is missing.
pub(crate) fn item_key(key_column: &str, item: &TableItem) -> Result<String, StoreError> {
    item.get(key_column)
        .cloned()
        .ok_or_else(|| StoreError::InvalidKey(format!("item has no {key_column} column")))
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn put_item(&self, item: TableItem) -> Result<(), StoreError> {
        let key = item_key(&self.key_column, &item)?;
        self.rows.lock().await.insert(key, item);
        Ok(())
    }

    async fn get_item(&self, key: &str) -> Result<Option<TableItem>, StoreError> {
        Ok(self.rows.lock().await.get(key).cloned())
    }

    async fn delete_item(&self, key: &str) -> Result<(), StoreError> {
        self.rows.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, label: &str) -> TableItem {
        TableItem::from([
            ("widget_id".to_string(), id.to_string()),
            ("label".to_string(), label.to_string()),
        ])
    }

    #[tokio::test]
    async fn put_overwrites_same_key() {
        let table = InMemoryTableStore::new();
        table.put_item(row("w1", "first")).await.unwrap();
        table.put_item(row("w1", "second")).await.unwrap();

        assert_eq!(table.len().await, 1);
        let stored = table.get_item("w1").await.unwrap().unwrap();
        assert_eq!(stored.get("label").map(String::as_str), Some("second"));
    }

    #[tokio::test]
    async fn put_without_key_column_fails() {
        let table = InMemoryTableStore::new();
        let item = TableItem::from([("label".to_string(), "x".to_string())]);
        let err = table.put_item(item).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn delete_missing_row_succeeds() {
        let table = InMemoryTableStore::new();
        table.delete_item("nope").await.unwrap();
        assert!(table.is_empty().await);
    }
}

//! FsTableStore - one JSON file per row
//!
//! Row files are named after the SHA-256 of the key: any key string maps to a
//! fixed-length, filesystem-safe name. The row itself carries the key, and a
//! read only returns it when that key matches.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::inmem_table_store::item_key;
use crate::domain::{StoreError, TableItem, WIDGET_ID_COLUMN};
use crate::ports::TableStore;

#[derive(Debug, Clone)]
pub struct FsTableStore {
    dir: PathBuf,
    key_column: String,
}

impl FsTableStore {
    /// Open (and create) a table directory keyed by `widget_id`.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            key_column: WIDGET_ID_COLUMN.to_string(),
        })
    }

    fn row_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{:x}.json", Sha256::digest(key.as_bytes())))
    }
}

#[async_trait]
impl TableStore for FsTableStore {
    async fn put_item(&self, item: TableItem) -> Result<(), StoreError> {
        let key = item_key(&self.key_column, &item)?;
        let path = self.row_path(&key);
        let body = serde_json::to_vec_pretty(&item)?;

        let partial = path.with_extension("json.partial");
        tokio::fs::write(&partial, body).await?;
        tokio::fs::rename(&partial, &path).await?;
        Ok(())
    }

    async fn get_item(&self, key: &str) -> Result<Option<TableItem>, StoreError> {
        match tokio::fs::read(self.row_path(key)).await {
            Ok(body) => {
                let item: TableItem = serde_json::from_slice(&body)?;
                let stored = item.get(&self.key_column).map(String::as_str);
                Ok((stored == Some(key)).then_some(item))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn delete_item(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.row_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rows_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let table = FsTableStore::open(dir.path().join("widgets")).await.unwrap();
        let item = TableItem::from([
            ("widget_id".to_string(), "w/1".to_string()),
            ("color".to_string(), "red".to_string()),
        ]);
        table.put_item(item.clone()).await.unwrap();

        let reopened = FsTableStore::open(dir.path().join("widgets")).await.unwrap();
        assert_eq!(reopened.get_item("w/1").await.unwrap(), Some(item));
    }

    #[tokio::test]
    async fn delete_removes_row_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let table = FsTableStore::open(dir.path()).await.unwrap();
        let item = TableItem::from([("widget_id".to_string(), "w1".to_string())]);
        table.put_item(item).await.unwrap();

        table.delete_item("w1").await.unwrap();
        table.delete_item("w1").await.unwrap();
        assert_eq!(table.get_item("w1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn long_keys_fit_in_a_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let table = FsTableStore::open(dir.path()).await.unwrap();
        let long_id = "w".repeat(300);
        let item = TableItem::from([("widget_id".to_string(), long_id.clone())]);

        table.put_item(item.clone()).await.unwrap();
        assert_eq!(table.get_item(&long_id).await.unwrap(), Some(item));

        table.delete_item(&long_id).await.unwrap();
        assert_eq!(table.get_item(&long_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn row_under_another_key_is_not_returned() {
        let dir = tempfile::tempdir().unwrap();
        let table = FsTableStore::open(dir.path()).await.unwrap();
        let item = TableItem::from([("widget_id".to_string(), "w2".to_string())]);
        std::fs::write(table.row_path("w1"), serde_json::to_vec(&item).unwrap()).unwrap();

        assert_eq!(table.get_item("w1").await.unwrap(), None);
    }
}

//! FsObjectStore - a directory used as a bucket
//!
//! Key `widgets/jane-doe/w1` maps to `<root>/widgets/jane-doe/w1`. Names
//! starting with `.` are never listed; writes go through a hidden temp file
//! and a rename so a reader never sees half an object.

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::domain::StoreError;
use crate::ports::ObjectStore;

/// FsObjectStore stores objects as plain files below `root`.
///
/// The content type is not persisted.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open an existing directory. A missing root surfaces as
    /// `StoreError::Unavailable` on first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open `root`, creating it first.
    pub async fn create(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
            && key.split('/').all(|segment| !segment.is_empty() && !segment.starts_with('.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }

    async fn ensure_root(&self) -> Result<(), StoreError> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StoreError::Unavailable(format!(
                "{} is not a directory",
                self.root.display()
            ))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::Unavailable(
                format!("{} does not exist", self.root.display()),
            )),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

/// Smallest visible file key below `dir`, searching depth-first in name order.
fn first_key(dir: &Path, key_prefix: &str, prefix: &str) -> io::Result<Option<String>> {
    let mut entries = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            (!name.starts_with('.')).then_some((name, entry.path()))
        })
        .collect::<Vec<_>>();
    entries.sort();

    for (name, path) in entries {
        let key = format!("{key_prefix}{name}");
        if path.is_dir() {
            let nested = format!("{key}/");
            // Skip subtrees that cannot hold a key with this prefix.
            if !nested.starts_with(prefix) && !prefix.starts_with(&nested) {
                continue;
            }
            if let Some(found) = first_key(&path, &nested, prefix)? {
                return Ok(Some(found));
            }
        } else if key.starts_with(prefix) {
            return Ok(Some(key));
        }
    }
    Ok(None)
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn list_first(&self, prefix: &str) -> Result<Option<String>, StoreError> {
        self.ensure_root().await?;
        let root = self.root.clone();
        let prefix = prefix.to_string();
        tokio::task::spawn_blocking(move || first_key(&root, "", &prefix))
            .await
            .map_err(|e| StoreError::Io(io::Error::other(format!("list task failed: {e}"))))?
            .map_err(StoreError::Io)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn put(&self, key: &str, body: Vec<u8>, _content_type: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        self.ensure_root().await?;
        let parent = path
            .parent()
            .ok_or_else(|| StoreError::InvalidKey(key.to_string()))?;
        tokio::fs::create_dir_all(parent).await?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| StoreError::InvalidKey(key.to_string()))?;
        let partial = parent.join(format!(".{file_name}.partial"));
        tokio::fs::write(&partial, body).await?;
        tokio::fs::rename(&partial, &path).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
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
    async fn put_get_delete_nested_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());

        store
            .put("widgets/jane-doe/w1", b"{\"a\":1}".to_vec(), "application/json")
            .await
            .unwrap();
        assert!(dir.path().join("widgets/jane-doe/w1").is_file());
        assert_eq!(store.get("widgets/jane-doe/w1").await.unwrap(), b"{\"a\":1}");

        store.delete("widgets/jane-doe/w1").await.unwrap();
        store.delete("widgets/jane-doe/w1").await.unwrap();
        assert!(matches!(
            store.get("widgets/jane-doe/w1").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_first_walks_directories_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());
        store.put("b/z.json", b"1".to_vec(), "").await.unwrap();
        store.put("b/a.json", b"2".to_vec(), "").await.unwrap();
        store.put("c.json", b"3".to_vec(), "").await.unwrap();
        std::fs::write(dir.path().join(".hidden"), b"x").unwrap();

        assert_eq!(store.list_first("").await.unwrap(), Some("b/a.json".into()));
        assert_eq!(store.list_first("c").await.unwrap(), Some("c.json".into()));
        assert_eq!(store.list_first("d").await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_root_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path().join("gone"));
        let err = store.list_first("").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsObjectStore::new(dir.path());
        for key in ["../x", "/etc/passwd", "a//b", "a/.b", ""] {
            let err = store.put(key, vec![], "").await.unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey(_)), "key {key:?}");
        }
    }
}

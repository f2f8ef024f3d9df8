//! InboxSource - RequestSource over an object-store inbox
//!
//! # Flow
//! 1. `list_first` under the inbox prefix (at most one key)
//! 2. read the whole body and parse it as JSON
//! 3. delete the key, then hand the value to the caller
//!
//! An item whose read fails permanently is removed and reported as
//! `Unreadable`; transient read failures leave it in place.
//!
//! A failed delete is only logged: the request is still returned and may be
//! delivered again later (at-least-once).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ErrorKind, SourceError};
use crate::ports::{ObjectStore, RequestSource};

pub struct InboxSource {
    store: Arc<dyn ObjectStore>,
    prefix: String,
}

impl InboxSource {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_prefix(store, "")
    }

    /// Only keys starting with `prefix` are treated as requests.
    pub fn with_prefix(store: Arc<dyn ObjectStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    async fn remove(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            tracing::warn!(key, error = %e, "failed to remove request from inbox; it may be delivered again");
        }
    }
}

#[async_trait]
impl RequestSource for InboxSource {
    async fn fetch(&self) -> Result<Option<Value>, SourceError> {
        let key = self
            .store
            .list_first(&self.prefix)
            .await
            .map_err(SourceError::List)?;

        let Some(key) = key else {
            return Ok(None);
        };

        let body = match self.store.get(&key).await {
            Ok(body) => body,
            // Listed but can never be read (vanished, dangling link, bad key):
            // drop it so it does not shadow the items behind it.
            Err(source) if source.kind() == ErrorKind::Permanent => {
                self.remove(&key).await;
                return Err(SourceError::Unreadable { key, source });
            }
            Err(source) => return Err(SourceError::Read { key, source }),
        };

        let parsed = serde_json::from_slice::<Value>(&body);

        // Removed even when unparseable, otherwise the item would be listed forever.
        self.remove(&key).await;

        match parsed {
            Ok(value) => {
                tracing::debug!(key = %key, "fetched request from inbox");
                Ok(Some(value))
            }
            Err(e) => Err(SourceError::Malformed {
                key,
                reason: e.to_string(),
            }),
        }
    }
}

//! ConsumerBuilder - wiring of a ConsumerLoop
//!
//! # Fail-fast
//! `build()` checks that the inbox and the store the configured strategy
//! needs were provided, so a misconfigured process stops at startup instead of
//! failing on the first request.

use std::sync::Arc;

use super::config::{ConsumerConfig, StorageStrategy};
use super::consumer_loop::ConsumerLoop;
use super::dispatch::Dispatcher;
use crate::impls::{DocumentStorage, InboxSource, TableStorage};
use crate::ports::{ObjectStore, RequestSource, TableStore, WidgetStorage};

/// BuildError is a wiring mistake found at startup.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no request inbox configured")]
    MissingInbox,

    #[error("storage strategy {0} selected but its store was not configured")]
    MissingStore(StorageStrategy),

    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
}

/// # Example
/// ```ignore
/// let consumer = ConsumerBuilder::new(ConsumerConfig::new(StorageStrategy::Table))
///     .inbox(inbox_store)
///     .table_store(table)
///     .build()?;
/// consumer.run().await?;
/// ```
pub struct ConsumerBuilder {
    config: ConsumerConfig,
    source: Option<Arc<dyn RequestSource>>,
    document_store: Option<Arc<dyn ObjectStore>>,
    table_store: Option<Arc<dyn TableStore>>,
}

impl ConsumerBuilder {
    pub fn new(config: ConsumerConfig) -> Self {
        Self {
            config,
            source: None,
            document_store: None,
            table_store: None,
        }
    }

    /// Use an object store as the inbox (keys under `config.inbox_prefix`).
    pub fn inbox(mut self, store: Arc<dyn ObjectStore>) -> Self {
        let source = InboxSource::with_prefix(store, self.config.inbox_prefix.clone());
        self.source = Some(Arc::new(source));
        self
    }

    pub fn document_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.document_store = Some(store);
        self
    }

    pub fn table_store(mut self, store: Arc<dyn TableStore>) -> Self {
        self.table_store = Some(store);
        self
    }

    pub fn build(self) -> Result<ConsumerLoop, BuildError> {
        if self.config.poll_interval_ms == 0 {
            return Err(BuildError::ZeroPollInterval);
        }
        let source = self.source.ok_or(BuildError::MissingInbox)?;

        let storage: Arc<dyn WidgetStorage> = match self.config.storage {
            StorageStrategy::Document => {
                let store = self
                    .document_store
                    .ok_or(BuildError::MissingStore(StorageStrategy::Document))?;
                Arc::new(DocumentStorage::with_prefix(
                    store,
                    self.config.document_prefix.clone(),
                ))
            }
            StorageStrategy::Table => {
                let table = self
                    .table_store
                    .ok_or(BuildError::MissingStore(StorageStrategy::Table))?;
                Arc::new(TableStorage::new(table))
            }
        };

        Ok(ConsumerLoop::new(
            source,
            Dispatcher::new(storage),
            self.config.poll_interval(),
            self.config.max_source_failures,
        ))
    }
}

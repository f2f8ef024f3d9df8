//! Dispatcher - routes a valid request to the active storage strategy

use std::sync::Arc;

use crate::domain::{RequestKind, StorageError, WidgetRequest};
use crate::ports::WidgetStorage;

#[derive(Debug)]
pub enum DispatchOutcome {
    Written,
    Deleted,
    /// The request type has no handler (e.g. `update`); nothing was changed.
    Ignored(String),
    Failed(StorageError),
}

pub struct Dispatcher {
    storage: Arc<dyn WidgetStorage>,
}

impl Dispatcher {
    pub fn new(storage: Arc<dyn WidgetStorage>) -> Self {
        Self { storage }
    }

    pub fn backend(&self) -> &'static str {
        self.storage.name()
    }

    /// Apply one request. Storage failures come back as `Failed`, never retried here.
    pub async fn route(&self, request: &WidgetRequest) -> DispatchOutcome {
        match &request.kind {
            RequestKind::Create => match self.storage.write(request).await {
                Ok(()) => DispatchOutcome::Written,
                Err(e) => DispatchOutcome::Failed(e),
            },
            RequestKind::Delete => match self.storage.delete(request).await {
                Ok(()) => DispatchOutcome::Deleted,
                Err(e) => DispatchOutcome::Failed(e),
            },
            RequestKind::Unhandled(kind) => DispatchOutcome::Ignored(kind.clone()),
        }
    }
}

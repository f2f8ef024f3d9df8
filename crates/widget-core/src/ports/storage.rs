//! WidgetStorage port - the storage strategy a consumer writes to.

use async_trait::async_trait;

use crate::domain::{StorageError, WidgetRequest};

/// WidgetStorage applies creates and deletes to one backend.
///
/// One implementation is chosen at startup and shared as
/// `Arc<dyn WidgetStorage>` for the lifetime of the process.
#[async_trait]
pub trait WidgetStorage: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Store (or overwrite) the widget described by a create request.
    async fn write(&self, request: &WidgetRequest) -> Result<(), StorageError>;

    /// Remove the widget named by a delete request.
    async fn delete(&self, request: &WidgetRequest) -> Result<(), StorageError>;
}

//! TableStorage - widgets as flat rows keyed by `widget_id`
//!
//! `otherAttributes` become columns. Delete only needs the widget id.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{StorageError, Widget, WidgetRequest};
use crate::ports::{TableStore, WidgetStorage};

const BACKEND: &str = "table";

pub struct TableStorage {
    table: Arc<dyn TableStore>,
}

impl TableStorage {
    pub fn new(table: Arc<dyn TableStore>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl WidgetStorage for TableStorage {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn write(&self, request: &WidgetRequest) -> Result<(), StorageError> {
        let item = Widget::from_request(request).to_item();
        self.table
            .put_item(item)
            .await
            .map_err(|source| StorageError::Write {
                backend: BACKEND,
                widget_id: request.widget_id.clone(),
                source,
            })?;

        tracing::info!(widget_id = %request.widget_id, request_id = %request.request_id, "widget stored in table");
        Ok(())
    }

    async fn delete(&self, request: &WidgetRequest) -> Result<(), StorageError> {
        self.table
            .delete_item(&request.widget_id)
            .await
            .map_err(|source| StorageError::Delete {
                backend: BACKEND,
                widget_id: request.widget_id.clone(),
                source,
            })?;

        tracing::info!(widget_id = %request.widget_id, request_id = %request.request_id, "widget deleted from table");
        Ok(())
    }
}

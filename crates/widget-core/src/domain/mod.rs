//! Domain model (requests, widgets, schema, errors).

pub mod errors;
pub mod request;
pub mod schema;
pub mod widget;

pub use self::errors::{ConsumerError, ErrorKind, SourceError, StorageError, StoreError};
pub use self::request::{OtherAttribute, RequestKind, WidgetRequest};
pub use self::schema::SchemaViolation;
pub use self::widget::{TableItem, WIDGET_ID_COLUMN, Widget, document_key, owner_slug};

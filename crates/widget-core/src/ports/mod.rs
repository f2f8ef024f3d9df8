//! Ports - contracts of the external collaborators
//!
//! Each trait hides one system the consumer talks to:
//! - ObjectStore: inbox transport and document backend
//! - TableStore: table backend
//! - RequestSource: single-item fetch with removal
//! - WidgetStorage: the active storage strategy

pub mod object_store;
pub mod request_source;
pub mod storage;
pub mod table_store;

pub use self::object_store::{JSON_CONTENT_TYPE, ObjectStore};
pub use self::request_source::RequestSource;
pub use self::storage::WidgetStorage;
pub use self::table_store::TableStore;

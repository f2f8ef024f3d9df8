//! Impls - adapters for the ports
//!
//! # Contents
//! - **InMemoryObjectStore / InMemoryTableStore**: tests and local runs
//! - **FsObjectStore / FsTableStore**: directory-backed stores used by the CLI
//! - **InboxSource**: RequestSource over any ObjectStore
//! - **DocumentStorage / TableStorage**: the two WidgetStorage strategies

pub mod document_storage;
pub mod fs_object_store;
pub mod fs_table_store;
pub mod inbox_source;
pub mod inmem_object_store;
pub mod inmem_table_store;
pub mod table_storage;

pub use self::document_storage::{DEFAULT_DOCUMENT_PREFIX, DocumentStorage};
pub use self::fs_object_store::FsObjectStore;
pub use self::fs_table_store::FsTableStore;
pub use self::inbox_source::InboxSource;
pub use self::inmem_object_store::{InMemoryObjectStore, StoredObject};
pub use self::inmem_table_store::InMemoryTableStore;
pub use self::table_storage::TableStorage;

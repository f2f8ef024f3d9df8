//! widget-core
//!
//! Building blocks of the widget request consumer: a worker that drains an
//! inbox one request at a time, validates each request, and applies it to one
//! of two storage strategies.
//!
//! # Modules
//! - **domain**: WidgetRequest, Widget, schema check, error types
//! - **ports**: ObjectStore, TableStore, RequestSource, WidgetStorage
//! - **impls**: in-memory and directory-backed adapters, inbox source, storages
//! - **app**: config, builder, dispatcher, consumer loop
//! - **observability**: tracing subscriber setup

pub mod app;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;

pub use app::{ConsumerBuilder, ConsumerConfig, ConsumerLoop, CycleOutcome, StorageStrategy};
pub use domain::{ConsumerError, RequestKind, WidgetRequest};

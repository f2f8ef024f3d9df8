//! App - the consumer built from ports
//!
//! # Components
//! - **ConsumerConfig**: storage selector and loop settings
//! - **ConsumerBuilder**: wiring with startup checks
//! - **Dispatcher**: request type -> storage call
//! - **ConsumerLoop**: fetch -> validate -> dispatch, idle on empty inbox
//! - **CycleStats**: counters per cycle outcome

pub mod builder;
pub mod config;
pub mod consumer_loop;
pub mod dispatch;
pub mod status;

pub use self::builder::{BuildError, ConsumerBuilder};
pub use self::config::{ConsumerConfig, StorageStrategy, UnknownStrategy};
pub use self::consumer_loop::{ConsumerLoop, CycleOutcome};
pub use self::dispatch::{DispatchOutcome, Dispatcher};
pub use self::status::CycleStats;

//! ConsumerConfig - process-level settings of one consumer

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::impls::DEFAULT_DOCUMENT_PREFIX;

/// Which backend the consumer writes to. Fixed for the process lifetime.
///
/// Parsed from `document`/`table`; the legacy names `bucket3` and `dynamodb`
/// are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageStrategy {
    /// JSON documents in an object store.
    Document,
    /// Flat rows in a key/value table.
    Table,
}

impl StorageStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageStrategy::Document => "document",
            StorageStrategy::Table => "table",
        }
    }
}

impl fmt::Display for StorageStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage strategy {0:?} (expected document or table)")]
pub struct UnknownStrategy(pub String);

impl FromStr for StorageStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "document" | "bucket3" => Ok(StorageStrategy::Document),
            "table" | "dynamodb" => Ok(StorageStrategy::Table),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_MAX_SOURCE_FAILURES: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerConfig {
    pub storage: StorageStrategy,

    /// Pause between polls of an empty inbox.
    pub poll_interval_ms: u64,

    /// Consecutive inbox list failures tolerated before giving up; 0 never gives up.
    pub max_source_failures: u32,

    /// Only inbox keys with this prefix are requests.
    pub inbox_prefix: String,

    /// First key segment of stored documents.
    pub document_prefix: String,
}

impl ConsumerConfig {
    pub fn new(storage: StorageStrategy) -> Self {
        Self {
            storage,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_source_failures: DEFAULT_MAX_SOURCE_FAILURES,
            inbox_prefix: String::new(),
            document_prefix: DEFAULT_DOCUMENT_PREFIX.to_string(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_accepts_legacy_names() {
        assert_eq!("bucket3".parse::<StorageStrategy>(), Ok(StorageStrategy::Document));
        assert_eq!("DynamoDB".parse::<StorageStrategy>(), Ok(StorageStrategy::Table));
        assert_eq!("table".parse::<StorageStrategy>(), Ok(StorageStrategy::Table));
        assert!("s3".parse::<StorageStrategy>().is_err());
    }

    #[test]
    fn new_config_uses_defaults() {
        let config = ConsumerConfig::new(StorageStrategy::Table);
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.max_source_failures, 30);
        assert_eq!(config.inbox_prefix, "");
        assert_eq!(config.document_prefix, "widgets");
    }

    #[test]
    fn strategy_display_round_trips() {
        for strategy in [StorageStrategy::Document, StorageStrategy::Table] {
            assert_eq!(strategy.to_string().parse::<StorageStrategy>(), Ok(strategy));
        }
    }
}

//! Errors - error types and their operational classification
//!
//! Every layer owns one `thiserror` enum. `ErrorKind` is the shared
//! classification the consumer loop uses to decide between "skip and
//! continue" and "stop the process".

use thiserror::Error;

/// ErrorKind classifies failures for the consumer loop.
///
/// - Transient: may succeed on a later cycle
/// - Permanent: retrying the same input is pointless
/// - Infrastructure: the collaborator itself is unreachable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Permanent,
    Infrastructure,
}

/// StoreError is the failure of an ObjectStore or TableStore call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Unavailable(_) => ErrorKind::Infrastructure,
            StoreError::NotFound(_) | StoreError::InvalidKey(_) | StoreError::Encoding(_) => {
                ErrorKind::Permanent
            }
            StoreError::Io(_) => ErrorKind::Transient,
        }
    }
}

/// SourceError is a failed fetch from the request inbox.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("inbox list failed: {0}")]
    List(#[source] StoreError),

    #[error("inbox read of {key} failed: {source}")]
    Read {
        key: String,
        #[source]
        source: StoreError,
    },

    /// The listed item can never be read; it was dropped from the inbox.
    #[error("inbox item {key} is unreadable and was dropped: {source}")]
    Unreadable {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("inbox item {key} is not valid JSON: {reason}")]
    Malformed { key: String, reason: String },
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::List(source)
            | SourceError::Read { source, .. }
            | SourceError::Unreadable { source, .. } => source.kind(),
            SourceError::Malformed { .. } => ErrorKind::Permanent,
        }
    }

    /// Fatal errors end the consumer loop instead of idling.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Infrastructure
    }

    /// The offending item is already gone; the next fetch sees the next item.
    pub fn dropped_item(&self) -> bool {
        matches!(
            self,
            SourceError::Unreadable { .. } | SourceError::Malformed { .. }
        )
    }

    /// Only a failing list says something about the inbox as a whole.
    pub fn is_list_failure(&self) -> bool {
        matches!(self, SourceError::List(_))
    }
}

/// StorageError is a failed write or delete against the active backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{backend} write of widget {widget_id} failed: {source}")]
    Write {
        backend: &'static str,
        widget_id: String,
        #[source]
        source: StoreError,
    },

    #[error("{backend} delete of widget {widget_id} failed: {source}")]
    Delete {
        backend: &'static str,
        widget_id: String,
        #[source]
        source: StoreError,
    },

    #[error("widget {widget_id} could not be encoded: {source}")]
    Encode {
        widget_id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::Write { source, .. } | StorageError::Delete { source, .. } => {
                source.kind()
            }
            StorageError::Encode { .. } => ErrorKind::Permanent,
        }
    }
}

/// ConsumerError ends the consumer loop.
#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error("request inbox unavailable: {0}")]
    SourceUnavailable(#[source] SourceError),

    #[error("request inbox failed {failures} consecutive times, last error: {last}")]
    SourceExhausted {
        failures: u32,
        #[source]
        last: SourceError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_store_is_fatal_for_the_source() {
        let err = SourceError::List(StoreError::Unavailable("bucket missing".into()));
        assert_eq!(err.kind(), ErrorKind::Infrastructure);
        assert!(err.is_fatal());
    }

    #[test]
    fn malformed_item_is_not_fatal() {
        let err = SourceError::Malformed {
            key: "req-1.json".into(),
            reason: "expected value".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Permanent);
        assert!(!err.is_fatal());
        assert!(err.dropped_item());
    }

    #[test]
    fn read_failure_does_not_count_as_list_failure() {
        let err = SourceError::Read {
            key: "req-1.json".into(),
            source: StoreError::Io(std::io::Error::other("reset")),
        };
        assert!(!err.is_list_failure());
        assert!(!err.dropped_item());
        assert!(!err.is_fatal());
    }

    #[test]
    fn io_failure_is_transient() {
        let io = std::io::Error::other("connection reset");
        let err = StorageError::Write {
            backend: "document",
            widget_id: "w1".into(),
            source: StoreError::from(io),
        };
        assert_eq!(err.kind(), ErrorKind::Transient);
        assert!(err.to_string().contains("w1"));
    }
}

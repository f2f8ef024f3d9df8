//! RequestSource port - where raw widget requests come from.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::SourceError;

/// RequestSource hands out at most one request per call.
///
/// A returned request has already been removed from the inbox, so the caller
/// owns it. `Ok(None)` means "nothing right now, try later".
#[async_trait]
pub trait RequestSource: Send + Sync {
    async fn fetch(&self) -> Result<Option<Value>, SourceError>;
}

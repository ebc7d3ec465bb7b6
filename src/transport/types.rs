//! Transport trait

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The three service operations pagination depends on.
///
/// Implementations own retries, authentication and serialization; the
/// cursors treat every `Err` as fatal to the current run.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Primary search operation
    async fn search(&self, request: Value) -> Result<Value>;

    /// Fetch the next batch of an open scroll context
    async fn scroll(&self, request: Value) -> Result<Value>;

    /// Release a scroll context
    async fn clear_scroll(&self, request: Value) -> Result<Value>;
}

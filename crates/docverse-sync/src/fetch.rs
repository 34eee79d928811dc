use async_trait::async_trait;
use serde_json::Value;

use crate::SourceError;

/// A remote directory feed.
///
/// Implementations perform a single GET and return the parsed JSON body.
/// Non-success statuses and unparseable bodies are errors; retries are the
/// caller's decision.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self) -> Result<Value, SourceError>;

    /// Where this feed points, for logging.
    fn describe(&self) -> &str;
}

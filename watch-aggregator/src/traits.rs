use crate::types::{FeedEntry, Result};
use async_trait::async_trait;

/// Retrieves and parses a syndication feed.
///
/// Implementations return the feed's entries in document order. Any network
/// or parse failure is reported as an error; callers decide whether it is
/// fatal.
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>>;
}

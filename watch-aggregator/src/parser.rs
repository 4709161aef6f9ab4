use crate::types::{FeedEntry, Result, WatchError};
use feed_rs::parser;
use tracing::{debug, info};

pub struct FeedParser;

impl FeedParser {
    /// Parses RSS or Atom content into entries, in document order.
    pub fn parse_feed(content: &str) -> Result<Vec<FeedEntry>> {
        Self::parse_bytes(content.as_bytes())
    }

    /// Like `parse_feed`, but leaves character decoding to feed-rs so the
    /// document's declared encoding is honoured.
    pub fn parse_bytes(content: &[u8]) -> Result<Vec<FeedEntry>> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content)
            .map_err(|e| WatchError::Parse(format!("Failed to parse feed: {}", e)))?;

        let entries: Vec<FeedEntry> = feed.entries.into_iter().map(Self::parse_entry).collect();

        info!("Parsed feed with {} entries", entries.len());
        Ok(entries)
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> FeedEntry {
        let title = entry.title.map(|t| t.content);
        // Items that only carry `content:encoded` or Atom `<content>` use it
        // as their summary.
        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body));
        let link = entry.links.into_iter().next().map(|l| l.href);
        let published = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.to_rfc2822());

        FeedEntry {
            title,
            summary,
            link,
            published,
        }
    }

    pub fn is_valid_feed_content(content: &str) -> bool {
        let content_lower = content.to_lowercase();

        let has_rss_indicators = content_lower.contains("<rss")
            || content_lower.contains("<feed")
            || content_lower.contains("<rdf:rdf")
            || content_lower.contains("<channel");

        has_rss_indicators && content.trim_start().starts_with('<')
    }
}

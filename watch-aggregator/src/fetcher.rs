use crate::parser::FeedParser;
use crate::rss_utils::url::extract_domain;
use crate::traits::FeedClient;
use crate::types::{FeedEntry, FetchConfig, Result, WatchError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Fetches feeds over HTTP and parses them with feed-rs. One GET per call,
/// no retries.
pub struct HttpFeedClient {
    client: Client,
    config: FetchConfig,
}

impl HttpFeedClient {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// Downloads the raw feed body. The size limit is enforced against the
    /// declared `Content-Length` and again while the body streams in, so
    /// chunked responses are bounded too.
    pub async fn fetch_content(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url)?;
        let start_time = Instant::now();

        debug!("Fetching feed: {}", parsed);

        let mut response = self.client.get(parsed).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(WatchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let limit = self.config.max_feed_bytes;
        if let Some(content_length) = response.content_length() {
            ensure_within_limit(content_length, limit)?;
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            ensure_within_limit(body.len() as u64, limit)?;
        }

        info!(
            "Fetched {} ({} bytes in {}ms)",
            extract_domain(url).unwrap_or_else(|| url.to_string()),
            body.len(),
            start_time.elapsed().as_millis()
        );

        Ok(body)
    }
}

fn ensure_within_limit(bytes: u64, limit: u64) -> Result<()> {
    if bytes > limit {
        return Err(WatchError::FeedTooLarge { bytes, limit });
    }
    Ok(())
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>> {
        let content = self.fetch_content(url).await?;

        if !FeedParser::is_valid_feed_content(&String::from_utf8_lossy(&content)) {
            warn!("Response from {} does not look like a feed", url);
        }

        FeedParser::parse_bytes(&content)
    }
}

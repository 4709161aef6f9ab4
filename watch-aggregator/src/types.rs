use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const NO_SUMMARY: &str = "No summary available.";
pub const NO_DATE: &str = "No date";
pub const UNTITLED: &str = "Untitled";

/// Region tag attached to every feed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "US")]
    Us,
    International,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Us => write!(f, "US"),
            Region::International => write!(f, "International"),
        }
    }
}

/// A compiled-in syndication source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedSource {
    pub name: &'static str,
    pub url: &'static str,
    pub region: Region,
}

/// One record as handed over by the feed-parsing collaborator. Every field
/// may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub published: Option<String>,
}

impl FeedEntry {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            summary: Some(summary.into()),
            link: None,
            published: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_published(mut self, published: impl Into<String>) -> Self {
        self.published = Some(published.into());
        self
    }
}

/// A matched entry, normalised and tagged with its source's region.
///
/// `summary` is kept exactly as the feed supplied it and may contain markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub source: String,
    pub published: String,
    pub region: Region,
}

impl Article {
    /// Builds an article from a raw entry, substituting placeholders for
    /// absent fields.
    pub fn from_entry(entry: FeedEntry, source: &FeedSource) -> Self {
        Self {
            title: entry.title.unwrap_or_else(|| UNTITLED.to_string()),
            summary: entry.summary.unwrap_or_else(|| NO_SUMMARY.to_string()),
            link: entry.link.unwrap_or_default(),
            source: source.name.to_string(),
            published: entry.published.unwrap_or_else(|| NO_DATE.to_string()),
            region: source.region,
        }
    }
}

/// Matched articles split by region, each bucket in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionalArticles {
    pub us: Vec<Article>,
    pub international: Vec<Article>,
}

impl RegionalArticles {
    pub fn push(&mut self, article: Article) {
        match article.region {
            Region::Us => self.us.push(article),
            Region::International => self.international.push(article),
        }
    }

    /// US articles followed by international ones.
    pub fn all(&self) -> Vec<Article> {
        self.us.iter().chain(self.international.iter()).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.us.len() + self.international.len()
    }

    pub fn is_empty(&self) -> bool {
        self.us.is_empty() && self.international.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_bytes: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "GreatExperimentWatch/1.0".to_string(),
            timeout_seconds: 30,
            max_feed_bytes: 10 * 1024 * 1024,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed size {bytes} bytes exceeds limit of {limit} bytes")]
    FeedTooLarge { bytes: u64, limit: u64 },

    #[error("No articles to export")]
    EmptyExportRequest,

    #[error("Report already exists: {}", path.display())]
    ArtifactExists { path: PathBuf },

    #[error("PDF generation error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WatchError>;

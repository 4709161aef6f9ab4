use crate::filter::{matches, KEYWORDS};
use crate::registry::Selection;
use crate::traits::FeedClient;
use crate::types::{Article, RegionalArticles};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct WatchAggregator {
    client: Arc<dyn FeedClient>,
    keywords: &'static [&'static str],
}

impl WatchAggregator {
    pub fn new(client: Arc<dyn FeedClient>) -> Self {
        Self {
            client,
            keywords: KEYWORDS,
        }
    }

    pub fn with_keywords(mut self, keywords: &'static [&'static str]) -> Self {
        self.keywords = keywords;
        self
    }

    /// Fetches every selected source once, in registry order, and keeps the
    /// entries that mention a keyword or `search`.
    ///
    /// A source that cannot be fetched or parsed contributes nothing; the
    /// remaining sources are still processed.
    pub async fn fetch(&self, selection: &Selection, search: &str) -> RegionalArticles {
        let mut articles = RegionalArticles::default();
        let mut failed_sources = 0;

        info!("Fetching {} sources", selection.len());

        for source in selection.sources() {
            let entries = match self.client.fetch_entries(source.url).await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Skipping {}: {}", source.name, e);
                    failed_sources += 1;
                    continue;
                }
            };

            let entries_found = entries.len();
            let mut matched = 0;

            for entry in entries {
                let article = Article::from_entry(entry, source);
                if matches(&article.title, &article.summary, self.keywords, search) {
                    debug!("Matched [{}] {}", source.name, article.title);
                    articles.push(article);
                    matched += 1;
                }
            }

            info!("{}: {} of {} entries matched", source.name, matched, entries_found);
        }

        info!(
            "Fetch complete: {} US, {} international, {} sources failed",
            articles.us.len(),
            articles.international.len(),
            failed_sources
        );

        articles
    }
}

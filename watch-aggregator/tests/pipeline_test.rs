use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tracing::info;
use watch_aggregator::{
    registry::find_source, select_sources, Classification, FeedClient, FeedEntry, Region, Result,
    Selection, WatchAggregator, WatchError, NO_DATE, NO_SUMMARY,
};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

/// Serves canned entries per feed URL and counts requests.
#[derive(Default)]
struct FixtureClient {
    feeds: HashMap<String, Vec<FeedEntry>>,
    requests: AtomicUsize,
}

impl FixtureClient {
    fn with_feed(mut self, source: &str, entries: Vec<FeedEntry>) -> Self {
        let url = find_source(source).expect("registered source").url;
        self.feeds.insert(url.to_string(), entries);
        self
    }
}

#[async_trait]
impl FeedClient for FixtureClient {
    async fn fetch_entries(&self, url: &str) -> Result<Vec<FeedEntry>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.feeds
            .get(url)
            .cloned()
            .ok_or_else(|| WatchError::Status { url: url.to_string(), status: 503 })
    }
}

fn fixture() -> FixtureClient {
    FixtureClient::default()
        .with_feed(
            "AP News",
            vec![
                FeedEntry::new("Governor invokes emergency powers", "Critics decry the move.")
                    .with_link("https://example.com/ap/1")
                    .with_published("Sat, 05 Jul 2025 10:00:00 GMT"),
                FeedEntry::new("Baseball season opens", "Fans return to stadiums."),
                FeedEntry::new("Voter suppression lawsuit filed", "Martial law rumours denied."),
            ],
        )
        .with_feed(
            "Reuters",
            vec![
                FeedEntry::new("Coup Unfolds", "military coup reported")
                    .with_link("https://example.com/reuters/1"),
                FeedEntry::new("Markets rally", "Stocks climb on earnings."),
            ],
        )
        .with_feed(
            "BBC World",
            vec![FeedEntry {
                title: Some("Press freedom index published".to_string()),
                summary: None,
                link: Some("https://example.com/bbc/1".to_string()),
                published: None,
            }],
        )
}

#[tokio::test]
async fn reuters_coup_scenario_triggers_alert() {
    init_tracing();

    let client = FixtureClient::default().with_feed(
        "Reuters",
        vec![FeedEntry::new("Coup Unfolds", "military coup reported")],
    );
    let aggregator = WatchAggregator::new(Arc::new(client));

    let articles = aggregator.fetch(&select_sources(["Reuters"]), "").await;
    let all = articles.all();
    let classification = Classification::of(&all);

    assert_eq!(all.len(), 1);
    assert_eq!(classification.emergencies.len(), 1);
    assert!(classification.routine.is_empty());
    assert!(classification.alert_triggered());
    info!("Coup scenario classified as emergency");
}

#[tokio::test]
async fn empty_selection_yields_nothing_and_makes_no_requests() {
    init_tracing();

    let client = Arc::new(fixture());
    let aggregator = WatchAggregator::new(client.clone());

    let articles = aggregator.fetch(&Selection::none(), "").await;
    let classification = Classification::of(&articles.all());

    assert!(articles.is_empty());
    assert!(!classification.alert_triggered());
    assert_eq!(client.requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn one_request_per_selected_source() {
    init_tracing();

    let client = Arc::new(fixture());
    let aggregator = WatchAggregator::new(client.clone());

    // Includes sources without fixtures, which fail and are skipped.
    let selection = Selection::all();
    let articles = aggregator.fetch(&selection, "").await;

    assert_eq!(client.requests.load(Ordering::SeqCst), selection.len());
    assert_eq!(articles.len(), 4);
}

#[tokio::test]
async fn every_article_matches_and_inherits_its_source_region() {
    init_tracing();

    let aggregator = WatchAggregator::new(Arc::new(fixture()));
    let articles = aggregator.fetch(&Selection::all(), "").await;

    let us_titles: Vec<_> = articles.us.iter().map(|a| a.title.as_str()).collect();
    let intl_titles: Vec<_> = articles.international.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        us_titles,
        vec!["Governor invokes emergency powers", "Voter suppression lawsuit filed"]
    );
    assert_eq!(intl_titles, vec!["Coup Unfolds", "Press freedom index published"]);

    for article in articles.us.iter().chain(articles.international.iter()) {
        let source = find_source(&article.source).unwrap();
        assert_eq!(article.region, source.region);
        assert!(watch_aggregator::matches(
            &article.title,
            &article.summary,
            watch_aggregator::KEYWORDS,
            ""
        ));
    }
    assert!(articles.us.iter().all(|a| a.region == Region::Us));
    assert!(articles.international.iter().all(|a| a.region == Region::International));

    let all = articles.all();
    assert_eq!(all.len(), articles.us.len() + articles.international.len());
    assert_eq!(&all[..articles.us.len()], &articles.us[..]);
}

#[tokio::test]
async fn missing_fields_are_defaulted() {
    init_tracing();

    let aggregator = WatchAggregator::new(Arc::new(fixture()));
    let articles = aggregator.fetch(&select_sources(["BBC World"]), "").await;

    let article = &articles.international[0];
    assert_eq!(article.summary, NO_SUMMARY);
    assert_eq!(article.published, NO_DATE);
    assert_eq!(article.source, "BBC World");
}

#[tokio::test]
async fn classification_reconstructs_the_matched_set() {
    init_tracing();

    let aggregator = WatchAggregator::new(Arc::new(fixture()));
    let all = aggregator.fetch(&Selection::all(), "").await.all();
    let classification = Classification::of(&all);

    let emergency_titles: Vec<_> =
        classification.emergencies.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(emergency_titles, vec!["Voter suppression lawsuit filed", "Coup Unfolds"]);
    assert_eq!(classification.len(), all.len());

    // Merging the halves back by original position gives the input.
    let mut merged = Vec::new();
    let (mut e, mut r) = (0, 0);
    for article in &all {
        if classification.emergencies.get(e) == Some(article) {
            merged.push(article.clone());
            e += 1;
        } else {
            assert_eq!(classification.routine.get(r), Some(article));
            merged.push(article.clone());
            r += 1;
        }
    }
    assert_eq!(merged, all);
    assert_eq!((e, r), (classification.emergencies.len(), classification.routine.len()));
}

#[tokio::test]
async fn search_term_adds_matches_but_only_by_substring() {
    init_tracing();

    let client = FixtureClient::default().with_feed(
        "The Guardian World",
        vec![
            FeedEntry::new("Madrid holds regional vote", "Turnout is high across the capital."),
            FeedEntry::new("Spain tightens budget", "Ministers agree spending cuts."),
        ],
    );
    let aggregator = WatchAggregator::new(Arc::new(client));
    let selection = select_sources(["The Guardian World"]);

    let without_search = aggregator.fetch(&selection, "").await;
    assert!(without_search.is_empty());

    let with_search = aggregator.fetch(&selection, "spain").await;
    let titles: Vec<_> = with_search.international.iter().map(|a| a.title.as_str()).collect();
    // The Madrid story is topically related but never says "spain".
    assert_eq!(titles, vec!["Spain tightens budget"]);
}

#[tokio::test]
async fn refetching_identical_content_is_idempotent() {
    init_tracing();

    let aggregator = WatchAggregator::new(Arc::new(fixture()));
    let selection = Selection::all();

    let first = aggregator.fetch(&selection, "lawsuit").await;
    let second = aggregator.fetch(&selection, "lawsuit").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn duplicate_stories_across_feeds_are_kept() {
    init_tracing();

    let story = FeedEntry::new("Coup Unfolds", "military coup reported")
        .with_link("https://example.com/shared");
    let client = FixtureClient::default()
        .with_feed("BBC World", vec![story.clone()])
        .with_feed("Al Jazeera", vec![story]);
    let aggregator = WatchAggregator::new(Arc::new(client));

    let articles = aggregator.fetch(&Selection::all(), "").await;
    let sources: Vec<_> = articles.international.iter().map(|a| a.source.as_str()).collect();
    assert_eq!(sources, vec!["BBC World", "Al Jazeera"]);
}

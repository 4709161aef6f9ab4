pub mod types;
pub mod registry;
pub mod traits;
pub mod fetcher;
pub mod parser;
pub mod filter;
pub mod aggregator;
pub mod classify;
pub mod dashboard;
pub mod report;
pub mod rss_utils;

pub use types::*;
pub use registry::{select_sources, Selection, SOURCES};
pub use traits::FeedClient;
pub use fetcher::HttpFeedClient;
pub use parser::FeedParser;
pub use filter::{matches, KEYWORDS};
pub use aggregator::WatchAggregator;
pub use classify::{is_emergency, Classification, EMERGENCY_TERMS};
pub use dashboard::{Dashboard, DemocracyIndicator};
pub use report::ReportExporter;

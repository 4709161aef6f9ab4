use crate::types::{FeedSource, Region};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Monitored feeds, in the order they are fetched.
pub const SOURCES: &[FeedSource] = &[
    // US outlets
    FeedSource {
        name: "AP News",
        url: "https://feedx.net/rss/ap.xml",
        region: Region::Us,
    },
    FeedSource {
        name: "NPR Politics",
        url: "https://feeds.npr.org/1014/rss.xml",
        region: Region::Us,
    },
    FeedSource {
        name: "PBS NewsHour",
        url: "https://www.pbs.org/newshour/feeds/rss/politics",
        region: Region::Us,
    },
    FeedSource {
        name: "The Hill",
        url: "https://thehill.com/feed/",
        region: Region::Us,
    },
    // International outlets
    FeedSource {
        name: "Reuters",
        url: "https://www.reutersagency.com/feed/?best-topics=political-general&post_type=best",
        region: Region::International,
    },
    FeedSource {
        name: "BBC World",
        url: "https://feeds.bbci.co.uk/news/world/rss.xml",
        region: Region::International,
    },
    FeedSource {
        name: "Al Jazeera",
        url: "https://www.aljazeera.com/xml/rss/all.xml",
        region: Region::International,
    },
    FeedSource {
        name: "The Guardian World",
        url: "https://www.theguardian.com/world/rss",
        region: Region::International,
    },
    FeedSource {
        name: "Deutsche Welle",
        url: "https://rss.dw.com/rdf/rss-en-all",
        region: Region::International,
    },
];

pub fn find_source(name: &str) -> Option<&'static FeedSource> {
    SOURCES.iter().find(|source| source.name == name)
}

pub fn source_names() -> impl Iterator<Item = &'static str> {
    SOURCES.iter().map(|source| source.name)
}

/// The set of registered sources a user picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    names: BTreeSet<&'static str>,
}

impl Selection {
    pub fn all() -> Self {
        Self {
            names: source_names().collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    /// Selected sources in registry order.
    pub fn sources(&self) -> impl Iterator<Item = &'static FeedSource> + '_ {
        SOURCES.iter().filter(move |source| self.contains(source.name))
    }
}

/// Resolves user-supplied names against the registry. Unknown names are
/// dropped.
pub fn select_sources<I, S>(names: I) -> Selection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selection = Selection::none();

    for name in names {
        let name = name.as_ref();
        match find_source(name) {
            Some(source) => {
                debug!("Selected source: {}", source.name);
                selection.names.insert(source.name);
            }
            None => warn!("Ignoring unknown source: {}", name),
        }
    }

    selection
}

//! Keyword relevance predicate.
//!
//! Matching is plain case-insensitive substring search over `title + " " +
//! summary`. It is not tokenized, so compound words match too ("democracywatch"
//! matches "democracy").

/// Terms an entry must mention (any one of them) to be kept.
pub const KEYWORDS: &[&str] = &[
    "authoritarian",
    "martial law",
    "election interference",
    "democracy",
    "coup",
    "military coup",
    "censorship",
    "voter suppression",
    "dictator",
    "insurrection",
    "emergency powers",
    "press freedom",
    "civil liberties",
];

/// True when the entry text contains any keyword, or the non-empty search
/// term.
pub fn matches(title: &str, summary: &str, keywords: &[&str], search: &str) -> bool {
    let text = format!("{} {}", title, summary).to_lowercase();

    keywords.iter().any(|kw| text.contains(&kw.to_lowercase()))
        || (!search.is_empty() && text.contains(&search.to_lowercase()))
}

use crate::types::Article;
use serde::Serialize;

/// Phrases whose presence in a summary marks an article as an emergency.
pub const EMERGENCY_TERMS: &[&str] = &["military coup", "martial law"];

pub fn is_emergency(article: &Article) -> bool {
    let summary = article.summary.to_lowercase();
    EMERGENCY_TERMS.iter().any(|term| summary.contains(term))
}

/// Emergency / routine split of a run's articles. Both halves keep the
/// input's relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub emergencies: Vec<Article>,
    pub routine: Vec<Article>,
}

impl Classification {
    pub fn of(articles: &[Article]) -> Self {
        let (emergencies, routine) = articles.iter().cloned().partition(is_emergency);
        Self { emergencies, routine }
    }

    pub fn alert_triggered(&self) -> bool {
        !self.emergencies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emergencies.len() + self.routine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emergencies.is_empty() && self.routine.is_empty()
    }
}

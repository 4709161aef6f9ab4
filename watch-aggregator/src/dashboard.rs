use crate::classify::Classification;
use crate::types::{Article, RegionalArticles, Result};
use serde::Serialize;

pub const TITLE: &str = "Great Experiment Watch";
pub const TAGLINE: &str =
    "Real-time tracker for authoritarian drift and democracy health indicators.";

const GAUGE_CELLS: usize = 20;

/// Manually set "democracy remaining" reading, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemocracyIndicator(u8);

impl DemocracyIndicator {
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    pub fn gauge(&self) -> String {
        let filled = (self.0 as usize * GAUGE_CELLS + 50) / 100;
        format!(
            "[{}{}] {}% democracy remaining",
            "#".repeat(filled),
            "-".repeat(GAUGE_CELLS - filled),
            self.0
        )
    }
}

impl Default for DemocracyIndicator {
    fn default() -> Self {
        Self(100)
    }
}

#[derive(Serialize)]
struct DashboardView<'a> {
    title: &'static str,
    democracy_remaining: u8,
    alert_triggered: bool,
    emergencies: &'a [Article],
    us: &'a [Article],
    international: &'a [Article],
}

pub struct Dashboard;

impl Dashboard {
    pub fn render_markdown(
        articles: &RegionalArticles,
        classification: &Classification,
        indicator: &DemocracyIndicator,
    ) -> String {
        let mut out = String::new();

        out.push_str(&format!("# {}\n\n", TITLE));
        out.push_str(&format!("**{}**\n\n", TAGLINE));
        out.push_str(&format!("`{}`\n\n", indicator.gauge()));

        if classification.alert_triggered() {
            out.push_str(&format!(
                "> **ALERT:** {} emergency-level event(s) detected.\n\n",
                classification.emergencies.len()
            ));
            out.push_str("## Emergency Alerts\n\n");
            for article in &classification.emergencies {
                write_article(&mut out, article);
            }
        }

        out.push_str("## US Headlines\n\n");
        write_section(&mut out, &articles.us);

        out.push_str("## International Headlines\n\n");
        write_section(&mut out, &articles.international);

        out
    }

    pub fn render_json(
        articles: &RegionalArticles,
        classification: &Classification,
        indicator: &DemocracyIndicator,
    ) -> Result<String> {
        let view = DashboardView {
            title: TITLE,
            democracy_remaining: indicator.percent(),
            alert_triggered: classification.alert_triggered(),
            emergencies: &classification.emergencies,
            us: &articles.us,
            international: &articles.international,
        };
        Ok(serde_json::to_string_pretty(&view)?)
    }
}

fn write_section(out: &mut String, articles: &[Article]) {
    if articles.is_empty() {
        out.push_str("_No matching headlines._\n\n");
        return;
    }
    for article in articles {
        write_article(out, article);
    }
}

fn write_article(out: &mut String, article: &Article) {
    out.push_str(&format!("### {}\n", article.title));
    if article.link.is_empty() {
        out.push_str(&format!("**Source:** {} | {}  \n", article.source, article.published));
    } else {
        out.push_str(&format!(
            "**Source:** [{}]({}) | {}  \n",
            article.source, article.link, article.published
        ));
    }
    out.push_str(&format!("{}\n\n---\n\n", article.summary));
}

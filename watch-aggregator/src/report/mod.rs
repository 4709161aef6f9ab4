//! PDF intelligence brief export.
//!
//! Each call writes a new `great_experiment_brief_<YYYYMMDD_HHMMSS>.pdf` into
//! the exporter's directory and returns its path. Files are never overwritten
//! and never cleaned up; the caller owns them.

pub mod layout;
pub mod pdf;

use crate::types::{Article, Result, WatchError};
use chrono::{Local, NaiveDateTime};
use layout::{BriefLayout, HEADER};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const ARTIFACT_PREFIX: &str = "great_experiment_brief_";

pub fn artifact_name(timestamp: &NaiveDateTime) -> String {
    format!("{}{}.pdf", ARTIFACT_PREFIX, timestamp.format("%Y%m%d_%H%M%S"))
}

pub struct ReportExporter {
    output_dir: PathBuf,
}

impl ReportExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes a brief for `articles`, stamped with the current local time.
    ///
    /// An empty list is rejected with [`WatchError::EmptyExportRequest`] and
    /// nothing is written.
    pub fn export(&self, articles: &[Article]) -> Result<PathBuf> {
        self.export_at(articles, Local::now().naive_local())
    }

    pub fn export_at(&self, articles: &[Article], timestamp: NaiveDateTime) -> Result<PathBuf> {
        if articles.is_empty() {
            warn!("Export requested with no articles");
            return Err(WatchError::EmptyExportRequest);
        }

        let layout = BriefLayout::build(articles, &timestamp.format("%Y-%m-%d %H:%M:%S").to_string());
        let bytes = pdf::render(&layout, HEADER)?;

        let path = self.output_dir.join(artifact_name(&timestamp));
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(WatchError::ArtifactExists { path });
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(&bytes)?;

        info!(
            "Exported {} articles ({} pages) to {}",
            articles.len(),
            layout.pages.len(),
            path.display()
        );
        Ok(path)
    }
}

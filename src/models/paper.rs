// file: src/models/paper.rs
// description: core paper model built from live search results
// reference: internal data structures

use crate::utils::text::normalize_whitespace;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One retrieved publication. Built fresh per pipeline invocation from the
/// search service response; never cached or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    pub abstract_text: String,
    pub link: String,
    pub published: DateTime<Utc>,
    /// Populated by the summary stage; `None` until it runs, guaranteed
    /// non-empty afterwards.
    pub summary: Option<String>,
}

impl Paper {
    pub fn new(
        title: String,
        abstract_text: String,
        link: String,
        published: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            abstract_text: normalize_whitespace(&abstract_text),
            link,
            published,
            summary: None,
        }
    }

    pub fn set_summary(&mut self, summary: String) {
        self.summary = Some(summary);
    }

    /// Summary if present, abstract otherwise. Rendering never shows an
    /// empty body even for papers that skipped the summary stage.
    pub fn display_text(&self) -> &str {
        match &self.summary {
            Some(summary) => summary,
            None => &self.abstract_text,
        }
    }
}

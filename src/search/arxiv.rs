// file: src/search/arxiv.rs
// description: arXiv Atom API client with phrase queries and recency filtering
// reference: https://info.arxiv.org/help/api/user-manual.html

use crate::config::SearchConfig;
use crate::error::{DigestError, Result};
use crate::models::Paper;
use crate::search::PaperSource;
use crate::utils::Validator;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use feed_rs::model::Feed;
use reqwest::Client;
use std::time;
use tracing::{debug, warn};

pub struct ArxivClient {
    client: Client,
    base_url: String,
}

impl ArxivClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        Validator::validate_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DigestError::Search(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Wrap the raw topic in a field-scoped phrase qualifier so multi-word
    /// topics search as exact phrases instead of being tokenized.
    fn phrase_query(topic: &str) -> String {
        format!("all:\"{}\"", topic.trim())
    }

    async fn query_feed(&self, topic: &str, max_results: usize) -> Result<Feed> {
        let query = Self::phrase_query(topic);

        debug!("Querying arXiv for {:?} (max {})", query, max_results);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("search_query", query.as_str()),
                ("start", "0"),
                ("max_results", &max_results.to_string()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await
            .map_err(|e| DigestError::Search(format!("arXiv request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DigestError::Search(format!(
                "arXiv request failed with status {}: {}",
                status, body
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DigestError::Search(format!("Failed to read arXiv response: {}", e)))?;

        feed_rs::parser::parse(&bytes[..])
            .map_err(|e| DigestError::Feed(format!("Failed to parse arXiv feed: {}", e)))
    }

    /// Convert feed entries to papers, keeping only those submitted at or
    /// after `cutoff`. Entries without a usable timestamp are skipped.
    fn entries_to_papers(feed: Feed, cutoff: DateTime<Utc>) -> Vec<Paper> {
        let mut papers = Vec::new();

        for entry in feed.entries {
            let Some(published) = entry.published.or(entry.updated) else {
                debug!("Skipping entry without timestamp: {}", entry.id);
                continue;
            };

            if published < cutoff {
                continue;
            }

            let title = entry.title.map(|t| t.content).unwrap_or_default();
            let abstract_text = entry.summary.map(|s| s.content).unwrap_or_default();
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_else(|| entry.id.clone());

            papers.push(Paper::new(title, abstract_text, link, published));
        }

        papers
    }
}

#[async_trait]
impl PaperSource for ArxivClient {
    async fn fetch(&self, topic: &str, days_back: i64, max_results: usize) -> Result<Vec<Paper>> {
        Validator::validate_topic(topic)?;
        Validator::validate_days_back(days_back)?;
        Validator::validate_max_results(max_results)?;

        let cutoff = Utc::now() - Duration::days(days_back);
        let feed = self.query_feed(topic, max_results).await?;

        if feed.entries.is_empty() {
            // The service reports "no matches" as a well-formed empty feed;
            // that is a valid empty result, not a failure.
            warn!("No results found for query: {}", topic);
            return Ok(Vec::new());
        }

        let papers = Self::entries_to_papers(feed, cutoff);
        debug!(
            "arXiv returned {} papers within the last {} day(s) for {:?}",
            papers.len(),
            days_back,
            topic
        );

        Ok(papers)
    }
}

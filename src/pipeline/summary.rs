// file: src/pipeline/summary.rs
// description: total summarization stage with deterministic local fallback
// reference: degradation policy over the summarizer client

use crate::models::Paper;
use crate::summarize::TextSummarizer;
use crate::utils::text::excerpt;
use std::time::Duration;
use tracing::{debug, warn};

/// Applies the summarizer to each selected paper, one at a time. This stage
/// never fails: any summarizer error is absorbed by a deterministic excerpt
/// of the abstract, so every paper leaves with a non-empty summary.
pub struct SummaryStage<M> {
    summarizer: M,
    fallback_chars: usize,
    delay: Duration,
}

impl<M: TextSummarizer> SummaryStage<M> {
    pub fn new(summarizer: M, fallback_chars: usize, delay_ms: u64) -> Self {
        Self {
            summarizer,
            fallback_chars,
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub async fn apply(&self, mut papers: Vec<Paper>) -> Vec<Paper> {
        let last = papers.len().saturating_sub(1);

        for (idx, paper) in papers.iter_mut().enumerate() {
            // Only the summarizer call is caught here; faults anywhere else
            // must stay visible.
            let summary = match self.summarizer.summarize(&paper.abstract_text).await {
                Ok(summary) => summary,
                Err(e) => {
                    warn!("Summarization failed for {:?}: {}", paper.title, e);
                    self.fallback(&paper.abstract_text)
                }
            };

            paper.set_summary(summary);
            debug!("Summarized {:?}", paper.title);

            // politeness throttle between model calls within one batch
            if idx < last && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        papers
    }

    fn fallback(&self, abstract_text: &str) -> String {
        excerpt(abstract_text, self.fallback_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DigestError, Result};
    use async_trait::async_trait;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    struct FixedSummarizer;

    #[async_trait]
    impl TextSummarizer for FixedSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String> {
            Ok("A model summary.".to_string())
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl TextSummarizer for FailingSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String> {
            Err(DigestError::Summarization("model unavailable".to_string()))
        }
    }

    fn paper_with_abstract(abstract_text: &str) -> Paper {
        Paper::new(
            "A Paper".to_string(),
            abstract_text.to_string(),
            "http://arxiv.org/abs/2406.00001".to_string(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_model_summary_is_used() {
        let stage = SummaryStage::new(FixedSummarizer, 200, 0);
        let papers = stage.apply(vec![paper_with_abstract("An abstract.")]).await;

        assert_eq!(papers[0].summary.as_deref(), Some("A model summary."));
    }

    #[tokio::test]
    async fn test_fallback_is_abstract_excerpt() {
        let long_abstract = "x".repeat(500);
        let stage = SummaryStage::new(FailingSummarizer, 200, 0);

        let papers = stage.apply(vec![paper_with_abstract(&long_abstract)]).await;

        let expected = format!("{}...", "x".repeat(200));
        assert_eq!(papers[0].summary.as_deref(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_every_paper_leaves_summarized() {
        let stage = SummaryStage::new(FailingSummarizer, 200, 0);
        let batch: Vec<Paper> = (0..4)
            .map(|i| paper_with_abstract(&format!("Abstract {}", i)))
            .collect();

        let papers = stage.apply(batch).await;

        assert_eq!(papers.len(), 4);
        for paper in &papers {
            let summary = paper.summary.as_deref().unwrap();
            assert!(!summary.is_empty());
        }
    }

    #[tokio::test]
    async fn test_short_abstract_fallback_keeps_marker() {
        let stage = SummaryStage::new(FailingSummarizer, 200, 0);
        let papers = stage.apply(vec![paper_with_abstract("Tiny.")]).await;

        assert_eq!(papers[0].summary.as_deref(), Some("Tiny...."));
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_no_op() {
        let stage = SummaryStage::new(FixedSummarizer, 200, 0);
        let papers = stage.apply(Vec::new()).await;
        assert!(papers.is_empty());
    }
}

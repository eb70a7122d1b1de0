// file: src/pipeline/topic.rs
// description: per-topic selection policy with single-shot fallback widening
// reference: selection policy over the paper source

use crate::config::DigestConfig;
use crate::error::Result;
use crate::models::Paper;
use crate::search::PaperSource;
use tracing::{debug, info};

/// Decides which papers make the digest for one topic: a narrow primary
/// fetch, one widened retry when the primary under-returns, then truncation
/// to the requested count.
pub struct TopicSelector<S> {
    source: S,
    policy: DigestConfig,
}

impl<S: PaperSource> TopicSelector<S> {
    pub fn new(source: S, policy: DigestConfig) -> Self {
        Self { source, policy }
    }

    /// Select up to `top_n` papers for `topic`, most recent first.
    ///
    /// When the primary window yields fewer than the configured minimum,
    /// the result is discarded and a single widened fetch replaces it:
    /// no merge, no further widening. Fewer than `top_n` papers after the
    /// widened fetch is not an error; all available papers are returned.
    pub async fn select(&self, topic: &str, top_n: usize) -> Result<Vec<Paper>> {
        let mut papers = self
            .source
            .fetch(
                topic,
                self.policy.primary_days_back,
                self.policy.primary_max_results,
            )
            .await?;

        if papers.len() < self.policy.min_primary_results {
            info!(
                "Only {} result(s) for {:?} in the last {} day(s); widening to {} day(s)",
                papers.len(),
                topic,
                self.policy.primary_days_back,
                self.policy.fallback_days_back
            );

            papers = self
                .source
                .fetch(
                    topic,
                    self.policy.fallback_days_back,
                    self.policy.fallback_max_results,
                )
                .await?;
        }

        papers.truncate(top_n);
        debug!("Selected {} paper(s) for {:?}", papers.len(), topic);

        Ok(papers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DigestError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    fn paper(n: usize) -> Paper {
        Paper::new(
            format!("Paper {}", n),
            format!("Abstract {}", n),
            format!("http://arxiv.org/abs/2406.{:05}", n),
            Utc::now(),
        )
    }

    fn papers(count: usize) -> Vec<Paper> {
        (0..count).map(paper).collect()
    }

    /// Scripted source: records every call's window parameters and pops a
    /// queued response per call.
    struct ScriptedSource {
        calls: Mutex<Vec<(i64, usize)>>,
        responses: Mutex<Vec<Result<Vec<Paper>>>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Vec<Paper>>>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                responses: Mutex::new(responses),
            }
        }

        fn calls(&self) -> Vec<(i64, usize)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<'a> PaperSource for &'a ScriptedSource {
        async fn fetch(
            &self,
            _topic: &str,
            days_back: i64,
            max_results: usize,
        ) -> Result<Vec<Paper>> {
            self.calls.lock().unwrap().push((days_back, max_results));
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn policy() -> DigestConfig {
        DigestConfig {
            papers_per_topic: 5,
            min_primary_results: 5,
            primary_days_back: 1,
            primary_max_results: 50,
            fallback_days_back: 7,
            fallback_max_results: 200,
        }
    }

    #[tokio::test]
    async fn test_no_fallback_when_primary_suffices() {
        let source = ScriptedSource::new(vec![Ok(papers(6))]);
        let selector = TopicSelector::new(&source, policy());

        let selected = selector.select("robotics", 5).await.unwrap();

        assert_eq!(selected.len(), 5);
        assert_eq!(source.calls(), vec![(1, 50)]);
    }

    #[tokio::test]
    async fn test_fallback_replaces_primary_result() {
        let primary = papers(3);
        let fallback: Vec<Paper> = (100..108).map(paper).collect();
        let source = ScriptedSource::new(vec![Ok(primary), Ok(fallback)]);
        let selector = TopicSelector::new(&source, policy());

        let selected = selector.select("graph neural network", 5).await.unwrap();

        // exactly one widened call, and the output is drawn from the
        // fallback result only
        assert_eq!(source.calls(), vec![(1, 50), (7, 200)]);
        assert_eq!(selected.len(), 5);
        assert_eq!(selected[0].title, "Paper 100");
        assert_eq!(selected[4].title, "Paper 104");
    }

    #[tokio::test]
    async fn test_truncation_preserves_order() {
        let source = ScriptedSource::new(vec![Ok(papers(10))]);
        let selector = TopicSelector::new(&source, policy());

        let selected = selector.select("statistics", 4).await.unwrap();

        let titles: Vec<&str> = selected.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Paper 0", "Paper 1", "Paper 2", "Paper 3"]);
    }

    #[tokio::test]
    async fn test_short_fallback_returns_all_available() {
        let source = ScriptedSource::new(vec![Ok(papers(0)), Ok(papers(2))]);
        let selector = TopicSelector::new(&source, policy());

        let selected = selector.select("bayesian", 5).await.unwrap();

        assert_eq!(selected.len(), 2);
        assert_eq!(source.calls(), vec![(1, 50), (7, 200)]);
    }

    #[tokio::test]
    async fn test_exact_threshold_skips_fallback() {
        let source = ScriptedSource::new(vec![Ok(papers(5))]);
        let selector = TopicSelector::new(&source, policy());

        let selected = selector.select("robotics", 5).await.unwrap();

        assert_eq!(selected.len(), 5);
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_primary_fetch_error_propagates() {
        let source = ScriptedSource::new(vec![Err(DigestError::Search(
            "service unreachable".to_string(),
        ))]);
        let selector = TopicSelector::new(&source, policy());

        let result = selector.select("robotics", 5).await;

        assert!(matches!(result, Err(DigestError::Search(_))));
        assert_eq!(source.calls().len(), 1);
    }
}

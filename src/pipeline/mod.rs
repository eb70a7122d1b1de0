// file: src/pipeline/mod.rs
// description: per-topic digest pipeline composed from selection and summary stages
// reference: internal module organization

pub mod orchestrator;
pub mod progress;
pub mod summary;
pub mod topic;

pub use orchestrator::DigestOrchestrator;
pub use progress::{ProgressTracker, RunStats};
pub use summary::SummaryStage;
pub use topic::TopicSelector;

use crate::error::Result;
use crate::models::Paper;
use crate::search::PaperSource;
use crate::summarize::TextSummarizer;

/// Fetch, select, and summarize papers for a single topic. One invocation
/// per subscriber-topic pair; nothing is shared or cached between
/// invocations, so identical topics across subscribers refetch.
pub struct DigestPipeline<S, M> {
    selector: TopicSelector<S>,
    summaries: SummaryStage<M>,
}

impl<S: PaperSource, M: TextSummarizer> DigestPipeline<S, M> {
    pub fn new(selector: TopicSelector<S>, summaries: SummaryStage<M>) -> Self {
        Self {
            selector,
            summaries,
        }
    }

    /// The full per-topic pipeline: select up to `top_n` recent papers,
    /// then summarize each. Fetch failures propagate; summarization never
    /// does.
    pub async fn top_for_topic(&self, topic: &str, top_n: usize) -> Result<Vec<Paper>> {
        let selected = self.selector.select(topic, top_n).await?;
        Ok(self.summaries.apply(selected).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DigestConfig;
    use crate::error::DigestError;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    struct ScriptedSource {
        calls: Mutex<Vec<(i64, usize)>>,
        responses: Mutex<Vec<Vec<Paper>>>,
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
            Ok(self.responses.lock().unwrap().remove(0))
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl TextSummarizer for FailingSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String> {
            Err(DigestError::Summarization("down".to_string()))
        }
    }

    fn papers(range: std::ops::Range<usize>) -> Vec<Paper> {
        range
            .map(|n| {
                Paper::new(
                    format!("Paper {}", n),
                    format!("Abstract {}", n),
                    format!("http://arxiv.org/abs/2406.{:05}", n),
                    Utc::now(),
                )
            })
            .collect()
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

    /// Primary returns 3 → fallback of 8 triggers → top 5 selected, every
    /// paper summarized (via fallback here, since the model is down).
    #[tokio::test]
    async fn test_end_to_end_fallback_and_summaries() {
        let source = ScriptedSource {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(vec![papers(0..3), papers(10..18)]),
        };
        let pipeline = DigestPipeline::new(
            TopicSelector::new(&source, policy()),
            SummaryStage::new(FailingSummarizer, 200, 0),
        );

        let result = pipeline
            .top_for_topic("graph neural network", 5)
            .await
            .unwrap();

        assert_eq!(source.calls.lock().unwrap().clone(), vec![(1, 50), (7, 200)]);
        assert_eq!(result.len(), 5);
        assert_eq!(result[0].title, "Paper 10");
        for paper in &result {
            assert!(paper.summary.as_deref().is_some_and(|s| !s.is_empty()));
        }
    }
}

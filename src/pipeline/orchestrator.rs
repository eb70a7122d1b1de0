// file: src/pipeline/orchestrator.rs
// description: outer loop over subscribers and topics with per-pair error isolation
// reference: coordinates store, pipeline, renderer, and mail transport

use crate::config::Config;
use crate::error::Result;
use crate::mail::MailTransport;
use crate::models::Paper;
use crate::pipeline::progress::{ProgressTracker, RunStats};
use crate::pipeline::DigestPipeline;
use crate::render;
use crate::search::PaperSource;
use crate::store::SubscriberStore;
use crate::summarize::TextSummarizer;
use std::time::Instant;
use tracing::{error, info, warn};

pub struct DigestOrchestrator<S, M> {
    config: Config,
    pipeline: DigestPipeline<S, M>,
    store: Box<dyn SubscriberStore>,
    mailer: Box<dyn MailTransport>,
}

impl<S: PaperSource, M: TextSummarizer> DigestOrchestrator<S, M> {
    pub fn new(
        config: Config,
        pipeline: DigestPipeline<S, M>,
        store: Box<dyn SubscriberStore>,
        mailer: Box<dyn MailTransport>,
    ) -> Self {
        Self {
            config,
            pipeline,
            store,
            mailer,
        }
    }

    /// Run the daily job: one digest per subscriber, one pipeline
    /// invocation per subscriber-topic pair. A failed topic or a failed
    /// send never stops the rest of the run; a store failure does, since
    /// there is no subscriber list to work from.
    pub async fn run(&self, dry_run: bool) -> Result<RunStats> {
        let start_time = Instant::now();
        info!("Starting digest run");

        let subscribers = self.store.list().await?;
        info!("Found {} subscriber(s)", subscribers.len());

        if subscribers.is_empty() {
            warn!("No subscribers found, nothing to send");
            return Ok(RunStats::new());
        }

        let progress = ProgressTracker::new(subscribers.len());

        for subscriber in &subscribers {
            progress.set_message(format!("Processing {}", subscriber.email));

            let mut topic_papers: Vec<(String, Vec<Paper>)> = Vec::new();

            for topic in &subscriber.topics {
                match self
                    .pipeline
                    .top_for_topic(topic, self.config.digest.papers_per_topic)
                    .await
                {
                    Ok(papers) => {
                        info!(
                            "Selected {} paper(s) for {} / {:?}",
                            papers.len(),
                            subscriber.email,
                            topic
                        );
                        progress.inc_topic();
                        progress.add_papers_summarized(papers.len());
                        topic_papers.push((topic.clone(), papers));
                    }
                    Err(e) => {
                        // isolation is per subscriber-topic pair: skip this
                        // topic, keep the rest of the digest
                        error!("Pipeline failed for {} / {:?}: {}", subscriber.email, topic, e);
                        progress.inc_topic_failed();
                    }
                }
            }

            if topic_papers.is_empty() {
                warn!(
                    "No topics produced results for {}, skipping send",
                    subscriber.email
                );
                progress.inc_subscriber();
                continue;
            }

            let html = render::render_digest(&topic_papers);

            if dry_run {
                info!(
                    "[dry-run] Would send {} topic(s) to {}",
                    topic_papers.len(),
                    subscriber.email
                );
            } else {
                match self
                    .mailer
                    .send(&subscriber.email, &self.config.mail.subject, &html)
                    .await
                {
                    Ok(()) => progress.inc_email_sent(),
                    Err(e) => {
                        error!("Send failed for {}: {}", subscriber.email, e);
                        progress.inc_email_failed();
                    }
                }
            }

            progress.inc_subscriber();
        }

        let mut stats = progress.get_stats();
        stats.duration_secs = start_time.elapsed().as_secs();
        progress.finish();

        self.log_final_stats(&stats);
        Ok(stats)
    }

    fn log_final_stats(&self, stats: &RunStats) {
        info!("=== Digest Run Summary ===");
        info!("Duration: {} seconds", stats.duration_secs);
        info!("Subscribers processed: {}", stats.subscribers_processed);
        info!("Topics processed: {}", stats.topics_processed);
        info!("Topics failed: {}", stats.topics_failed);
        info!("Topic success rate: {:.2}%", stats.topic_success_rate());
        info!("Papers summarized: {}", stats.papers_summarized);
        info!("Emails sent: {}", stats.emails_sent);
        info!("Emails failed: {}", stats.emails_failed);
        info!("==========================");
    }
}

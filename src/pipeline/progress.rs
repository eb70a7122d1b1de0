// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for a digest run
// reference: uses indicatif for progress bars and tracks run metrics

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub subscribers_processed: usize,
    pub topics_processed: usize,
    pub topics_failed: usize,
    pub emails_sent: usize,
    pub emails_failed: usize,
    pub papers_summarized: usize,
    pub duration_secs: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic_success_rate(&self) -> f64 {
        let total = self.topics_processed + self.topics_failed;
        if total == 0 {
            return 0.0;
        }
        (self.topics_processed as f64 / total as f64) * 100.0
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    subscribers_processed: AtomicUsize,
    topics_processed: AtomicUsize,
    topics_failed: AtomicUsize,
    emails_sent: AtomicUsize,
    emails_failed: AtomicUsize,
    papers_summarized: AtomicUsize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_subscribers: usize) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = multi_progress.add(ProgressBar::new(total_subscribers as u64));
        main_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );

        let detail_bar = multi_progress.add(ProgressBar::new(0));
        detail_bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg}")
                .expect("Failed to create detail bar template"),
        );

        Self {
            main_bar,
            detail_bar,
            subscribers_processed: AtomicUsize::new(0),
            topics_processed: AtomicUsize::new(0),
            topics_failed: AtomicUsize::new(0),
            emails_sent: AtomicUsize::new(0),
            emails_failed: AtomicUsize::new(0),
            papers_summarized: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_subscriber(&self) {
        self.subscribers_processed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_topic(&self) {
        self.topics_processed.fetch_add(1, Ordering::SeqCst);
        self.update_detail_bar();
    }

    pub fn inc_topic_failed(&self) {
        self.topics_failed.fetch_add(1, Ordering::SeqCst);
        self.update_detail_bar();
    }

    pub fn inc_email_sent(&self) {
        self.emails_sent.fetch_add(1, Ordering::SeqCst);
        self.update_detail_bar();
    }

    pub fn inc_email_failed(&self) {
        self.emails_failed.fetch_add(1, Ordering::SeqCst);
        self.update_detail_bar();
    }

    pub fn add_papers_summarized(&self, count: usize) {
        self.papers_summarized.fetch_add(count, Ordering::SeqCst);
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Run complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> RunStats {
        RunStats {
            subscribers_processed: self.subscribers_processed.load(Ordering::SeqCst),
            topics_processed: self.topics_processed.load(Ordering::SeqCst),
            topics_failed: self.topics_failed.load(Ordering::SeqCst),
            emails_sent: self.emails_sent.load(Ordering::SeqCst),
            emails_failed: self.emails_failed.load(Ordering::SeqCst),
            papers_summarized: self.papers_summarized.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn update_detail_bar(&self) {
        let sent = self.emails_sent.load(Ordering::SeqCst);
        let failed = self.topics_failed.load(Ordering::SeqCst);

        self.detail_bar
            .set_message(format!("Emails sent: {} | Failed topics: {}", sent, failed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_success_rate() {
        let mut stats = RunStats::new();
        stats.topics_processed = 9;
        stats.topics_failed = 1;

        assert!((stats.topic_success_rate() - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_run_stats_empty_rate() {
        let stats = RunStats::new();
        assert_eq!(stats.topic_success_rate(), 0.0);
    }

    #[test]
    fn test_tracker_counters() {
        let tracker = ProgressTracker::new(3);

        tracker.inc_subscriber();
        tracker.inc_topic();
        tracker.inc_topic();
        tracker.inc_topic_failed();
        tracker.inc_email_sent();
        tracker.add_papers_summarized(5);

        let stats = tracker.get_stats();
        assert_eq!(stats.subscribers_processed, 1);
        assert_eq!(stats.topics_processed, 2);
        assert_eq!(stats.topics_failed, 1);
        assert_eq!(stats.emails_sent, 1);
        assert_eq!(stats.papers_summarized, 5);
    }
}

// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod mail;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod schedule;
pub mod search;
pub mod store;
pub mod summarize;
pub mod utils;

pub use config::{
    Config, DigestConfig, MailBackend, MailConfig, ScheduleConfig, SearchConfig, StoreBackend,
    StoreConfig, SummarizerConfig,
};
pub use error::{DigestError, Result};
pub use mail::{MailTransport, ResendMailer, SmtpMailer};
pub use models::{Paper, Subscriber};
pub use pipeline::{
    DigestOrchestrator, DigestPipeline, ProgressTracker, RunStats, SummaryStage, TopicSelector,
};
pub use schedule::SendWindow;
pub use search::{ArxivClient, PaperSource};
pub use store::{GitHubJsonStore, SubscriberStore, SupabaseStore};
pub use summarize::{HfSummarizer, TextSummarizer};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _window = SendWindow::new(&config.schedule);
    }
}

// file: src/summarize/mod.rs
// description: text summarizer trait seam and hosted model client
// reference: internal module organization

pub mod hf;

pub use hf::HfSummarizer;

use crate::error::Result;
use async_trait::async_trait;

/// An opaque text-to-text summarization function. Implementations carry
/// their own generation bounds and use deterministic decoding, so repeated
/// calls on identical input are expected to be stable.
#[async_trait]
pub trait TextSummarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String>;
}

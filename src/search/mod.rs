// file: src/search/mod.rs
// description: paper source trait seam and the arXiv client implementation
// reference: internal module organization

pub mod arxiv;

pub use arxiv::ArxivClient;

use crate::error::Result;
use crate::models::Paper;
use async_trait::async_trait;

/// A time-bounded literature search. Implementations query an external
/// service for the `max_results` most recently submitted papers matching
/// `topic` and return only those published within the last `days_back`
/// days, most recent first.
#[async_trait]
pub trait PaperSource: Send + Sync {
    async fn fetch(&self, topic: &str, days_back: i64, max_results: usize) -> Result<Vec<Paper>>;
}

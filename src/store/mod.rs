// file: src/store/mod.rs
// description: subscriber store trait seam and backend selection
// reference: internal module organization

pub mod github;
pub mod supabase;

pub use github::GitHubJsonStore;
pub use supabase::SupabaseStore;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::Result;
use crate::models::Subscriber;
use async_trait::async_trait;

/// Subscriber persistence. Failures here are surfaced to the operator; a
/// silently lost subscription change is a correctness risk, so nothing in
/// this layer absorbs errors.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Subscriber>>;
    async fn upsert(&self, subscriber: &Subscriber) -> Result<()>;
    async fn delete(&self, email: &str) -> Result<()>;
}

pub fn from_config(config: &StoreConfig) -> Result<Box<dyn SubscriberStore>> {
    match config.backend {
        StoreBackend::Supabase => Ok(Box::new(SupabaseStore::new(&config.supabase)?)),
        StoreBackend::Github => Ok(Box::new(GitHubJsonStore::new(&config.github)?)),
    }
}

// file: src/store/supabase.rs
// description: hosted subscriber table client over the PostgREST API
// reference: https://supabase.com/docs/guides/api

use crate::config::SupabaseConfig;
use crate::error::{DigestError, Result};
use crate::models::Subscriber;
use crate::store::SubscriberStore;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
struct SubscriberRow {
    email: String,
    topics: Vec<String>,
}

pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
    roster_table: String,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            DigestError::Config("Supabase backend selected but no API key configured".to_string())
        })?;

        Ok(Self {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key,
            table: config.table.clone(),
            roster_table: config.roster_table.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn check_status(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DigestError::Store(format!(
                "{} failed with status {}: {}",
                action, status, body
            )));
        }
        Ok(response)
    }

    /// Keep the append-only roster of every address that ever subscribed.
    /// Duplicate inserts are ignored server-side.
    async fn record_roster(&self, email: &str) -> Result<()> {
        let response = self
            .auth(self.client.post(self.table_url(&self.roster_table)))
            .header("Prefer", "resolution=ignore-duplicates")
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(|e| DigestError::Store(format!("Roster insert failed: {}", e)))?;

        Self::check_status(response, "Roster insert").await?;
        Ok(())
    }
}

#[async_trait]
impl SubscriberStore for SupabaseStore {
    async fn list(&self) -> Result<Vec<Subscriber>> {
        debug!("Listing subscribers from {}", self.table);

        let response = self
            .auth(self.client.get(self.table_url(&self.table)))
            .query(&[("select", "email,topics")])
            .send()
            .await
            .map_err(|e| DigestError::Store(format!("Subscriber list failed: {}", e)))?;

        let response = Self::check_status(response, "Subscriber list").await?;

        let rows: Vec<SubscriberRow> = response
            .json()
            .await
            .map_err(|e| DigestError::Store(format!("Failed to parse subscriber rows: {}", e)))?;

        let subscribers = rows
            .into_iter()
            .map(|row| Subscriber {
                email: row.email,
                topics: row.topics,
            })
            .collect();

        Ok(subscribers)
    }

    async fn upsert(&self, subscriber: &Subscriber) -> Result<()> {
        let row = SubscriberRow {
            email: subscriber.email.clone(),
            topics: subscriber.topics.clone(),
        };

        let response = self
            .auth(self.client.post(self.table_url(&self.table)))
            .query(&[("on_conflict", "email")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row)
            .send()
            .await
            .map_err(|e| DigestError::Store(format!("Subscriber upsert failed: {}", e)))?;

        Self::check_status(response, "Subscriber upsert").await?;
        self.record_roster(&subscriber.email).await?;

        info!("Upserted subscription for {}", subscriber.email);
        Ok(())
    }

    async fn delete(&self, email: &str) -> Result<()> {
        let response = self
            .auth(self.client.delete(self.table_url(&self.table)))
            .query(&[("email", &format!("eq.{}", email))])
            .send()
            .await
            .map_err(|e| DigestError::Store(format!("Subscriber delete failed: {}", e)))?;

        Self::check_status(response, "Subscriber delete").await?;

        info!("Deleted subscription for {}", email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_config(api_key: Option<&str>) -> SupabaseConfig {
        SupabaseConfig {
            url: "https://project.supabase.co/".to_string(),
            api_key: api_key.map(|k| k.to_string()),
            table: "subscribers".to_string(),
            roster_table: "all_subscribers".to_string(),
        }
    }

    #[test]
    fn test_requires_api_key() {
        assert!(SupabaseStore::new(&store_config(None)).is_err());
        assert!(SupabaseStore::new(&store_config(Some("key"))).is_ok());
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let store = SupabaseStore::new(&store_config(Some("key"))).unwrap();
        assert_eq!(
            store.table_url("subscribers"),
            "https://project.supabase.co/rest/v1/subscribers"
        );
    }

    #[test]
    fn test_row_round_trip() {
        let row = SubscriberRow {
            email: "reader@example.com".to_string(),
            topics: vec!["robotics".to_string()],
        };

        let json = serde_json::to_string(&row).unwrap();
        let back: SubscriberRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.email, "reader@example.com");
        assert_eq!(back.topics, vec!["robotics"]);
    }
}

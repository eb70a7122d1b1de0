// file: src/store/github.rs
// description: subscriber map stored as a JSON blob via the GitHub contents API
// reference: https://docs.github.com/en/rest/repos/contents

use crate::config::GitHubConfig;
use crate::error::{DigestError, Result};
use crate::models::Subscriber;
use crate::store::SubscriberStore;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// email -> topics, kept sorted so commits diff cleanly.
type SubscriberMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

pub struct GitHubJsonStore {
    client: Client,
    contents_url: String,
    token: String,
}

impl GitHubJsonStore {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let token = config.token.clone().ok_or_else(|| {
            DigestError::Config("GitHub backend selected but no token configured".to_string())
        })?;

        let client = Client::builder()
            .user_agent(concat!("paper_digest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DigestError::Store(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            contents_url: format!(
                "https://api.github.com/repos/{}/{}/contents/{}",
                config.owner, config.repo, config.path
            ),
            token,
        })
    }

    /// Read the current map plus the blob SHA, the version token the next
    /// write must carry. A missing file is an empty store.
    async fn read(&self) -> Result<(SubscriberMap, Option<String>)> {
        let response = self
            .client
            .get(&self.contents_url)
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| DigestError::Store(format!("Contents read failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Subscriber file not found, treating as empty store");
            return Ok((SubscriberMap::new(), None));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DigestError::Store(format!(
                "Contents read failed with status {}: {}",
                status, body
            )));
        }

        let contents: ContentsResponse = response
            .json()
            .await
            .map_err(|e| DigestError::Store(format!("Failed to parse contents response: {}", e)))?;

        let map = Self::decode_map(&contents.content)?;
        Ok((map, Some(contents.sha)))
    }

    async fn write(&self, map: &SubscriberMap, sha: Option<String>, message: &str) -> Result<()> {
        let serialized = serde_json::to_string_pretty(map)?;

        let mut payload = json!({
            "message": message,
            "content": STANDARD.encode(serialized.as_bytes()),
        });
        if let Some(sha) = sha {
            payload["sha"] = json!(sha);
        }

        let response = self
            .client
            .put(&self.contents_url)
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| DigestError::Store(format!("Contents write failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DigestError::Store(format!(
                "Contents write failed with status {}: {}",
                status, body
            )));
        }

        Ok(())
    }

    /// The API base64-encodes file content with embedded newlines.
    fn decode_map(content: &str) -> Result<SubscriberMap> {
        let stripped: String = content.chars().filter(|c| !c.is_whitespace()).collect();

        let bytes = STANDARD
            .decode(stripped)
            .map_err(|e| DigestError::Store(format!("Invalid base64 content: {}", e)))?;

        let text = String::from_utf8(bytes)
            .map_err(|e| DigestError::Store(format!("Subscriber file is not UTF-8: {}", e)))?;

        if text.trim().is_empty() {
            return Ok(SubscriberMap::new());
        }

        serde_json::from_str(&text)
            .map_err(|e| DigestError::Store(format!("Invalid subscriber JSON: {}", e)))
    }
}

#[async_trait]
impl SubscriberStore for GitHubJsonStore {
    async fn list(&self) -> Result<Vec<Subscriber>> {
        let (map, _) = self.read().await?;

        Ok(map
            .into_iter()
            .map(|(email, topics)| Subscriber { email, topics })
            .collect())
    }

    async fn upsert(&self, subscriber: &Subscriber) -> Result<()> {
        let (mut map, sha) = self.read().await?;
        map.insert(subscriber.email.clone(), subscriber.topics.clone());

        let message = format!("Update subscription for {}", subscriber.email);
        self.write(&map, sha, &message).await?;

        info!("Upserted subscription for {}", subscriber.email);
        Ok(())
    }

    async fn delete(&self, email: &str) -> Result<()> {
        let (mut map, sha) = self.read().await?;

        if map.remove(email).is_none() {
            return Err(DigestError::Store(format!(
                "No subscription found for {}",
                email
            )));
        }

        let message = format!("Remove subscription for {}", email);
        self.write(&map, sha, &message).await?;

        info!("Deleted subscription for {}", email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_map_with_newlines() {
        let json = r#"{"reader@example.com": ["robotics", "statistics"]}"#;
        let encoded = STANDARD.encode(json.as_bytes());
        // the API wraps encoded content across lines
        let wrapped = format!("{}\n{}", &encoded[..10], &encoded[10..]);

        let map = GitHubJsonStore::decode_map(&wrapped).unwrap();
        assert_eq!(
            map.get("reader@example.com").unwrap(),
            &vec!["robotics".to_string(), "statistics".to_string()]
        );
    }

    #[test]
    fn test_decode_empty_file() {
        let encoded = STANDARD.encode(b"");
        let map = GitHubJsonStore::decode_map(&encoded).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert!(GitHubJsonStore::decode_map("not base64 at all!!!").is_err());
    }

    #[test]
    fn test_requires_token() {
        let config = GitHubConfig {
            owner: "octocat".to_string(),
            repo: "digest-data".to_string(),
            path: "subscribers.json".to_string(),
            token: None,
        };
        assert!(GitHubJsonStore::new(&config).is_err());
    }
}

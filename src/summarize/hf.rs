// file: src/summarize/hf.rs
// description: Hugging Face Inference API client for abstract summarization
// reference: https://huggingface.co/docs/api-inference

use crate::config::SummarizerConfig;
use crate::error::{DigestError, Result};
use crate::summarize::TextSummarizer;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct SummaryRequest {
    inputs: String,
    parameters: SummaryParameters,
}

#[derive(Debug, Serialize)]
struct SummaryParameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary_text: String,
}

pub struct HfSummarizer {
    client: Client,
    api_url: String,
    api_token: Option<String>,
    min_length: usize,
    max_length: usize,
}

impl HfSummarizer {
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DigestError::Summarization(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
            min_length: config.min_length,
            max_length: config.max_length,
        })
    }
}

#[async_trait]
impl TextSummarizer for HfSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let request = SummaryRequest {
            inputs: text.to_string(),
            parameters: SummaryParameters {
                min_length: self.min_length,
                max_length: self.max_length,
                do_sample: false,
            },
        };

        debug!("Requesting summary for {} chars", text.len());

        let mut builder = self.client.post(&self.api_url).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder.send().await.map_err(|e| {
            DigestError::Summarization(format!("Failed to send summarization request: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DigestError::Summarization(format!(
                "Summarization request failed with status {}: {}",
                status, error_text
            )));
        }

        let summaries: Vec<SummaryResponse> = response.json().await.map_err(|e| {
            DigestError::Summarization(format!("Failed to parse summarization response: {}", e))
        })?;

        match summaries.into_iter().next() {
            Some(summary) if !summary.summary_text.trim().is_empty() => {
                debug!("Received summary of {} chars", summary.summary_text.len());
                Ok(summary.summary_text)
            }
            _ => Err(DigestError::Summarization(
                "No summary returned from model".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_is_deterministic() {
        let request = SummaryRequest {
            inputs: "An abstract.".to_string(),
            parameters: SummaryParameters {
                min_length: 25,
                max_length: 70,
                do_sample: false,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], "An abstract.");
        assert_eq!(json["parameters"]["min_length"], 25);
        assert_eq!(json["parameters"]["max_length"], 70);
        assert_eq!(json["parameters"]["do_sample"], false);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"[{"summary_text": "A short summary."}]"#;
        let parsed: Vec<SummaryResponse> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed[0].summary_text, "A short summary.");
    }
}

// file: src/mail/resend.rs
// description: transactional-email HTTP API transport
// reference: https://resend.com/docs/api-reference/emails/send-email

use crate::config::MailConfig;
use crate::error::{DigestError, Result};
use crate::mail::MailTransport;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::info;

pub struct ResendMailer {
    client: Client,
    api_url: String,
    api_key: String,
    sender: String,
}

impl ResendMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let api_key = config.resend.api_key.clone().ok_or_else(|| {
            DigestError::Config("Resend backend selected but no API key configured".to_string())
        })?;

        Ok(Self {
            client: Client::new(),
            api_url: config.resend.api_url.clone(),
            api_key,
            sender: config.sender.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for ResendMailer {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<()> {
        let payload = json!({
            "from": self.sender,
            "to": [recipient],
            "subject": subject,
            "html": html_body,
        });

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| DigestError::Mail(format!("Resend request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DigestError::Mail(format!(
                "Resend request failed with status {}: {}",
                status, body
            )));
        }

        info!("Sent digest to {} via Resend", recipient);
        Ok(())
    }
}

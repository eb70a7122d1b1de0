// file: src/mail/smtp.rs
// description: authenticated STARTTLS SMTP submission transport
// reference: https://docs.rs/lettre

use crate::config::MailConfig;
use crate::error::{DigestError, Result};
use crate::mail::MailTransport;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp.host)
            .map_err(|e| DigestError::Mail(format!("Invalid SMTP relay: {}", e)))?
            .port(config.smtp.port);

        if let (Some(username), Some(password)) = (&config.smtp.username, &config.smtp.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            sender: config.sender.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<()> {
        let message = Message::builder()
            .from(
                self.sender
                    .parse()
                    .map_err(|e| DigestError::Mail(format!("Invalid sender address: {}", e)))?,
            )
            .to(recipient
                .parse()
                .map_err(|e| DigestError::Mail(format!("Invalid recipient address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| DigestError::Mail(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DigestError::Mail(format!("SMTP send failed: {}", e)))?;

        info!("Sent digest to {} via SMTP", recipient);
        Ok(())
    }
}

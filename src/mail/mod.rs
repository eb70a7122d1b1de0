// file: src/mail/mod.rs
// description: mail transport trait seam and backend selection
// reference: internal module organization

pub mod resend;
pub mod smtp;

pub use resend::ResendMailer;
pub use smtp::SmtpMailer;

use crate::config::{MailBackend, MailConfig};
use crate::error::Result;
use async_trait::async_trait;

/// Outbound mail at its narrowest: one recipient, one subject, one HTML
/// body. No retry or backoff; a failed send surfaces to the caller.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<()>;
}

/// Build the configured transport. The two backends are interchangeable at
/// this boundary.
pub fn from_config(config: &MailConfig) -> Result<Box<dyn MailTransport>> {
    match config.backend {
        MailBackend::Smtp => Ok(Box::new(SmtpMailer::new(config)?)),
        MailBackend::Resend => Ok(Box::new(ResendMailer::new(config)?)),
    }
}

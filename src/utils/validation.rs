// file: src/utils/validation.rs
// description: input validation helpers for topics, addresses, and query bounds
// reference: input validation patterns

use crate::error::{DigestError, Result};
use crate::models::subscriber::MAX_TOPICS;

pub struct Validator;

impl Validator {
    pub fn validate_topic(topic: &str) -> Result<()> {
        if topic.trim().is_empty() {
            return Err(DigestError::Validation("Topic is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_email(email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DigestError::Validation("Email is empty".to_string()));
        }

        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(DigestError::Validation(format!(
                "Invalid email address: {}",
                email
            )));
        }

        Ok(())
    }

    pub fn validate_topic_count(topics: &[String]) -> Result<()> {
        if topics.is_empty() {
            return Err(DigestError::Validation(
                "At least one topic is required".to_string(),
            ));
        }

        if topics.len() > MAX_TOPICS {
            return Err(DigestError::Validation(format!(
                "Too many topics: {} (max {})",
                topics.len(),
                MAX_TOPICS
            )));
        }

        Ok(())
    }

    pub fn validate_days_back(days_back: i64) -> Result<()> {
        if days_back < 1 {
            return Err(DigestError::Validation(format!(
                "days_back must be positive, got {}",
                days_back
            )));
        }
        Ok(())
    }

    pub fn validate_max_results(max_results: usize) -> Result<()> {
        if max_results == 0 {
            return Err(DigestError::Validation(
                "max_results must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(DigestError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }
}

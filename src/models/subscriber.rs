// file: src/models/subscriber.rs
// description: subscriber record with email and topic validation
// reference: internal data structures

use crate::error::Result;
use crate::utils::Validator;
use serde::{Deserialize, Serialize};

/// Subscribers pick at most this many topics.
pub const MAX_TOPICS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscriber {
    pub email: String,
    pub topics: Vec<String>,
}

impl Subscriber {
    /// Construct a validated subscriber. Rejects malformed addresses, empty
    /// topic lists, more than [`MAX_TOPICS`] topics, and blank topics.
    pub fn new(email: &str, topics: Vec<String>) -> Result<Self> {
        Validator::validate_email(email)?;

        let topics: Vec<String> = topics
            .into_iter()
            .map(|t| t.trim().to_string())
            .collect();
        Validator::validate_topic_count(&topics)?;
        for topic in &topics {
            Validator::validate_topic(topic)?;
        }

        Ok(Self {
            email: email.trim().to_string(),
            topics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_valid() {
        let sub = Subscriber::new(
            "reader@example.com",
            vec!["robotics".to_string(), " statistics ".to_string()],
        )
        .unwrap();

        assert_eq!(sub.email, "reader@example.com");
        assert_eq!(sub.topics, vec!["robotics", "statistics"]);
    }

    #[test]
    fn test_subscriber_rejects_bad_email() {
        assert!(Subscriber::new("not-an-email", vec!["ml".to_string()]).is_err());
    }

    #[test]
    fn test_subscriber_rejects_topic_counts() {
        assert!(Subscriber::new("reader@example.com", vec![]).is_err());

        let four = (0..4).map(|i| format!("topic{}", i)).collect();
        assert!(Subscriber::new("reader@example.com", four).is_err());
    }

    #[test]
    fn test_subscriber_rejects_blank_topic() {
        assert!(Subscriber::new("reader@example.com", vec!["  ".to_string()]).is_err());
    }
}

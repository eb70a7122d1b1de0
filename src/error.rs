// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DigestError>;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search service error: {0}")]
    Search(String),

    #[error("Feed parsing error: {0}")]
    Feed(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Subscriber store error: {0}")]
    Store(String),

    #[error("Mail transport error: {0}")]
    Mail(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// file: src/models/mod.rs
// description: data model exports
// reference: internal module organization

pub mod paper;
pub mod subscriber;

pub use paper::Paper;
pub use subscriber::{MAX_TOPICS, Subscriber};

//! Error types for the event feed
//!
//! None of these ever escape the poll loop: the cycle controller turns them
//! into the error placeholder and a log line.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedError {
    /// HTTP status of the failed request, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Api { status, .. } => Some(*status),
            FeedError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

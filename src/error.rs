// src/error.rs
use thiserror::Error;

/// Failures of a digest run, one variant per pipeline stage.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("credential error: {0}")]
    Credential(String),

    #[error("failed to fetch job postings: {0}")]
    Fetch(String),

    #[error("failed to send digest email: {0}")]
    Send(String),
}

pub type Result<T> = std::result::Result<T, DigestError>;

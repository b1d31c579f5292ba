use thiserror::Error;

use crate::types::Variant;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to retrieve {variant} response - error code {status}")]
    UnexpectedStatus { variant: Variant, status: u16 },

    #[error("{variant} should return the same value as provided hash (expected {expected}, got {actual})")]
    DigestMismatch {
        variant: Variant,
        expected: String,
        actual: String,
    },

    #[error("Worker error: {0}")]
    Worker(String),
}

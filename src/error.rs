// src/error.rs

use thiserror::Error;

/// The spreadsheet could not be reached or returned something unusable.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    #[error("request to sheet failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response is not wrapped in a callback envelope")]
    Envelope,
    #[error("invalid sheet JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sheet reported an error: {0}")]
    Sheet(String),
    #[error("sheet response has no table")]
    MissingTable,
}

//! Error types for the outreach generation system.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum OutreachError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Provider response malformed: {0}")]
    MalformedResponse(String),

    #[error("Provider request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid input file {path:?}: {message}")]
    InvalidInput { path: PathBuf, message: String },

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OutreachError {
    /// Whether another attempt against the provider could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OutreachError::ProviderRequestFailed(_)
                | OutreachError::ProviderRateLimit(_)
                | OutreachError::ProviderError(_)
                | OutreachError::MalformedResponse(_)
                | OutreachError::Timeout(_)
        )
    }
}

impl From<config::ConfigError> for OutreachError {
    fn from(err: config::ConfigError) -> Self {
        OutreachError::ConfigError(err.to_string())
    }
}

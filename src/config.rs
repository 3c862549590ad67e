//! Configuration System
//!
//! Layered configuration for the generation engine: built-in defaults, then the global
//! config file, then workspace files, then `OUTREACH__` environment variables. The
//! provider API key is resolved from its environment variable once, after loading.

use crate::batch::{BatchConfig, RetryPolicy};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::provider::ProviderConfig;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::environment::{ENV_PREFIX, ENV_SEPARATOR};
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::ENV_NAME_VAR;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutreachConfig {
    /// Remote generator endpoint and model
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Chunking and parallelism
    #[serde(default)]
    pub batch: BatchConfig,

    /// Per-job retry budget, timeouts and quality rules
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Provider(String),
    Batch(String),
    Retry(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "provider: {}", msg),
            ValidationError::Batch(msg) => write!(f, "batch: {}", msg),
            ValidationError::Retry(msg) => write!(f, "retry: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl OutreachConfig {
    /// Fill secrets that are configured indirectly through environment variables.
    pub fn resolve_secrets(mut self) -> Self {
        self.provider = self.provider.resolve_api_key();
        self
    }

    /// Validate the entire configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.batch.validate() {
            errors.push(ValidationError::Batch(e));
        }
        if let Err(e) = self.retry.validate() {
            errors.push(ValidationError::Retry(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

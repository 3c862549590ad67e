//! Remote Generator Abstraction
//!
//! The text-generation endpoint is consumed through the [`RemoteGenerator`] trait so the
//! retry and batching layers can run against the HTTP client in production and against
//! scripted doubles in tests. Responses follow the Responses API shape: a list of output
//! items, each carrying typed content parts.

use crate::error::OutreachError;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

pub mod profile;
pub mod responses;

pub use profile::ProviderConfig;
pub use responses::ResponsesClient;

/// Raw response from a single generation call.
///
/// Non-success statuses are returned as values; only transport faults are errors.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl GenerationResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }

    pub fn with_status(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    pub fn status_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Concatenate the text of every `output_text` part inside `message` items.
    ///
    /// A body that parses but has no matching parts yields an empty string; a body whose
    /// structure does not match at all is reported as malformed.
    pub fn output_text(&self) -> Result<String, OutreachError> {
        let parsed: ResponsesBody = serde_json::from_value(self.body.clone())
            .map_err(|e| OutreachError::MalformedResponse(e.to_string()))?;

        let text: String = parsed
            .output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .map(|part| part.text.as_str())
            .collect();
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct ResponsesBody {
    #[serde(default)]
    output: Vec<OutputItem>,
}

/// One entry of the `output` array.
#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

/// One typed part inside an output item.
#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

/// Remote text-generation capability
#[async_trait]
pub trait RemoteGenerator: Send + Sync {
    /// Generate text for a rendered prompt.
    ///
    /// Implementations should give up after `timeout`; callers enforce it as well.
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        timeout: Duration,
    ) -> Result<GenerationResponse, OutreachError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// Factory for creating generator clients from configuration
pub struct GeneratorFactory;

impl GeneratorFactory {
    pub fn create(config: &ProviderConfig) -> Result<Arc<dyn RemoteGenerator>, OutreachError> {
        config
            .validate()
            .map_err(|e| OutreachError::ConfigError(format!("Provider config: {}", e)))?;
        Ok(Arc::new(ResponsesClient::new(config)?))
    }
}

//! HTTP client for OpenAI-compatible Responses endpoints.

use crate::error::OutreachError;
use crate::provider::{GenerationResponse, ProviderConfig, RemoteGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const PROVIDER_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    temperature: f32,
    max_output_tokens: u32,
}

// Map transport-level failures to OutreachError
fn map_http_error(error: reqwest::Error, timeout: Duration) -> OutreachError {
    if error.is_timeout() {
        OutreachError::Timeout(timeout)
    } else if error.is_connect() {
        OutreachError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else if error.is_decode() {
        OutreachError::MalformedResponse(format!("Failed to decode response: {}", error))
    } else {
        OutreachError::ProviderError(format!("HTTP error: {}", error))
    }
}

fn build_provider_http_client() -> Result<Client, OutreachError> {
    Client::builder()
        .connect_timeout(PROVIDER_HTTP_CONNECT_TIMEOUT)
        .build()
        .map_err(|e| OutreachError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

/// Responses API client
pub struct ResponsesClient {
    client: Client,
    model: String,
    api_key: String,
    endpoint: String,
    max_output_tokens: u32,
}

impl ResponsesClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, OutreachError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| OutreachError::ProviderNotConfigured("missing API key".to_string()))?;
        let client = build_provider_http_client()?;

        Ok(Self {
            client,
            model: config.model.clone(),
            api_key,
            endpoint: format!("{}/responses", config.base_url.trim_end_matches('/')),
            max_output_tokens: config.max_output_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteGenerator for ResponsesClient {
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        timeout: Duration,
    ) -> Result<GenerationResponse, OutreachError> {
        let request = ResponsesRequest {
            model: &self.model,
            input: prompt,
            temperature,
            max_output_tokens: self.max_output_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_http_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!(status = status.as_u16(), error = %error_text, "Provider returned non-success status");
            return Ok(GenerationResponse::with_status(
                status.as_u16(),
                json!({ "error": error_text }),
            ));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| map_http_error(e, timeout))?;

        Ok(GenerationResponse::with_status(status.as_u16(), body))
    }

    fn provider_name(&self) -> &str {
        "responses"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

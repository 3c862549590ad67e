//! Retrying requester: turns one unreliable generator call into a bounded, best-effort
//! call that always ends in a [`JobResult`].

use crate::batch::job::JobResult;
use crate::batch::sanitize::{sanitize_output, QualityRejection};
use crate::error::OutreachError;
use crate::provider::RemoteGenerator;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Failure reason recorded when every attempt was used up.
pub const EXHAUSTED_REASON: &str = "no output after retries";

/// Retry, timeout and quality settings for one job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum attempts per job (the retry budget)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Per-attempt timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delay after a non-success status (milliseconds)
    #[serde(default = "default_status_backoff_ms")]
    pub status_backoff_ms: u64,

    /// Delay after a transport fault, timeout or malformed response (milliseconds)
    #[serde(default = "default_fault_backoff_ms")]
    pub fault_backoff_ms: u64,

    /// Half-width of the uniform temperature jitter applied per attempt
    #[serde(default = "default_temperature_jitter")]
    pub temperature_jitter: f32,

    /// Minimum accepted length of the normalized text (characters)
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

fn default_max_attempts() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_status_backoff_ms() -> u64 {
    2000
}

fn default_fault_backoff_ms() -> u64 {
    1500
}

fn default_temperature_jitter() -> f32 {
    0.05
}

fn default_min_chars() -> usize {
    30
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            timeout_secs: default_timeout_secs(),
            status_backoff_ms: default_status_backoff_ms(),
            fault_backoff_ms: default_fault_backoff_ms(),
            temperature_jitter: default_temperature_jitter(),
            min_chars: default_min_chars(),
        }
    }
}

impl RetryPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn status_backoff(&self) -> Duration {
        Duration::from_millis(self.status_backoff_ms)
    }

    pub fn fault_backoff(&self) -> Duration {
        Duration::from_millis(self.fault_backoff_ms)
    }

    /// Validate retry settings
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        if !self.temperature_jitter.is_finite() || self.temperature_jitter < 0.0 {
            return Err(format!(
                "temperature_jitter must be a non-negative number, got {}",
                self.temperature_jitter
            ));
        }
        Ok(())
    }
}

/// Why a single attempt did not produce usable text.
#[derive(Debug)]
pub enum AttemptFailure {
    /// The endpoint answered with a non-success status
    Status(u16),
    /// The attempt exceeded its timeout
    TimedOut(Duration),
    /// Transport or protocol fault
    Fault(OutreachError),
    /// The response body did not have the expected structure
    Malformed(OutreachError),
    /// The text was too short after normalization
    Rejected(QualityRejection),
}

impl AttemptFailure {
    /// Delay before the next attempt, if any.
    fn backoff(&self, policy: &RetryPolicy) -> Option<Duration> {
        match self {
            AttemptFailure::Status(_) => Some(policy.status_backoff()),
            AttemptFailure::TimedOut(_)
            | AttemptFailure::Fault(_)
            | AttemptFailure::Malformed(_) => Some(policy.fault_backoff()),
            AttemptFailure::Rejected(_) => None,
        }
    }

    fn retryable_hint(&self) -> bool {
        match self {
            AttemptFailure::Fault(err) | AttemptFailure::Malformed(err) => err.is_retryable(),
            _ => true,
        }
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Status(status) => write!(f, "non-success status {}", status),
            AttemptFailure::TimedOut(timeout) => write!(f, "timed out after {:?}", timeout),
            AttemptFailure::Fault(err) => write!(f, "{}", err),
            AttemptFailure::Malformed(err) => write!(f, "{}", err),
            AttemptFailure::Rejected(rejection) => write!(f, "{}", rejection),
        }
    }
}

/// Bounded-retry wrapper around a [`RemoteGenerator`].
pub struct RetryingRequester {
    generator: Arc<dyn RemoteGenerator>,
    policy: RetryPolicy,
}

impl RetryingRequester {
    pub fn new(generator: Arc<dyn RemoteGenerator>, policy: RetryPolicy) -> Self {
        Self { generator, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run up to `max_attempts` attempts and return the first qualifying text.
    ///
    /// Never fails: exhausted attempts yield `Failure("no output after retries")`.
    pub async fn attempt(&self, prompt: &str, base_temperature: f32) -> JobResult {
        if prompt.trim().is_empty() {
            warn!("Refusing to send an empty prompt");
            return JobResult::failure("empty prompt");
        }

        let max_attempts = self.policy.max_attempts;
        for attempt in 1..=max_attempts {
            let temperature = self.jittered(base_temperature);
            let start = Instant::now();
            debug!(
                provider = self.generator.provider_name(),
                model = self.generator.model_name(),
                attempt,
                temperature,
                "Provider request sent"
            );

            match self.try_once(prompt, temperature).await {
                Ok(text) => {
                    info!(
                        attempt,
                        duration_ms = start.elapsed().as_millis(),
                        response_chars = text.chars().count(),
                        "Generation succeeded"
                    );
                    return JobResult::Success(text);
                }
                Err(failure) => {
                    warn!(
                        attempt,
                        max_attempts,
                        retryable = failure.retryable_hint(),
                        duration_ms = start.elapsed().as_millis(),
                        reason = %failure,
                        "Generation attempt failed"
                    );
                    if attempt < max_attempts {
                        if let Some(delay) = failure.backoff(&self.policy) {
                            sleep(delay).await;
                        }
                    }
                }
            }
        }

        warn!(max_attempts, "Generation failed permanently");
        JobResult::failure(EXHAUSTED_REASON)
    }

    async fn try_once(&self, prompt: &str, temperature: f32) -> Result<String, AttemptFailure> {
        let timeout = self.policy.timeout();
        let call = self.generator.generate(prompt, temperature, timeout);

        let response = match tokio::time::timeout(timeout, call).await {
            Err(_) => return Err(AttemptFailure::TimedOut(timeout)),
            Ok(Err(OutreachError::Timeout(elapsed))) => {
                return Err(AttemptFailure::TimedOut(elapsed))
            }
            Ok(Err(err)) => return Err(AttemptFailure::Fault(err)),
            Ok(Ok(response)) => response,
        };

        if !response.status_ok() {
            return Err(AttemptFailure::Status(response.status));
        }

        let raw = response.output_text().map_err(AttemptFailure::Malformed)?;
        sanitize_output(&raw, self.policy.min_chars).map_err(AttemptFailure::Rejected)
    }

    fn jittered(&self, base: f32) -> f32 {
        let jitter = self.policy.temperature_jitter;
        let offset = if jitter > 0.0 {
            rand::thread_rng().gen_range(-jitter..=jitter)
        } else {
            0.0
        };
        (base + offset).max(0.0)
    }
}

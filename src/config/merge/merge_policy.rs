//! Merge rules: defaults, override order, conflict handling.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the built-in defaults applied.
///
/// Later sources override these key by key, so a file that only sets
/// `batch.pool_width` keeps every other default.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.base_url", "https://api.groq.com/openai/v1")?
        .set_default("provider.model", "openai/gpt-oss-20b")?
        .set_default("provider.api_key_env", "GROQ_API_KEY")?
        .set_default("provider.max_output_tokens", 550_i64)?
        .set_default("provider.temperature", 0.9_f64)?
        .set_default("batch.chunk_size", 20_i64)?
        .set_default("batch.pool_width", 5_i64)?
        .set_default("retry.max_attempts", 3_i64)?
        .set_default("retry.timeout_secs", 60_i64)?
        .set_default("retry.status_backoff_ms", 2000_i64)?
        .set_default("retry.fault_backoff_ms", 1500_i64)?
        .set_default("retry.temperature_jitter", 0.05_f64)?
        .set_default("retry.min_chars", 30_i64)
}

//! Shared test utilities for integration tests
//!
//! Generator doubles that stand in for the remote API, and helpers for temporary
//! workspaces and input files.

use async_trait::async_trait;
use outreach::error::OutreachError;
use outreach::provider::{GenerationResponse, RemoteGenerator};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex as StdMutex;
use std::time::Duration;
use tempfile::TempDir;

/// Serializes tests that read or write process environment variables.
pub static ENV_MUTEX: StdMutex<()> = StdMutex::new(());

pub fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

pub fn message_body(text: &str) -> serde_json::Value {
    json!({
        "output": [
            { "type": "reasoning", "summary": [] },
            { "type": "message", "content": [{ "type": "output_text", "text": text }] }
        ]
    })
}

/// Writes a reply built from the opener the prompt asks for, unless the prompt names a
/// recipient listed in `always_short`, in which case the reply is too short to keep.
#[derive(Default)]
pub struct RecordingGenerator {
    pub calls: Mutex<Vec<String>>,
    pub always_short: Vec<String>,
}

impl RecordingGenerator {
    pub fn with_short_replies_for(names: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            always_short: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Calls grouped by the opener line of each prompt.
    pub fn calls_by_opener(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for prompt in self.calls.lock().iter() {
            *counts.entry(opener(prompt).to_string()).or_insert(0) += 1;
        }
        counts
    }
}

fn opener(prompt: &str) -> &str {
    prompt
        .lines()
        .find_map(|line| line.strip_prefix("Begin with: "))
        .unwrap_or("")
}

#[async_trait]
impl RemoteGenerator for RecordingGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _temperature: f32,
        _timeout: Duration,
    ) -> Result<GenerationResponse, OutreachError> {
        self.calls.lock().push(prompt.to_string());
        let opener = opener(prompt);
        if self.always_short.iter().any(|name| opener.contains(name.as_str())) {
            return Ok(GenerationResponse::ok(message_body("Hi.")));
        }
        Ok(GenerationResponse::ok(message_body(&format!(
            "\"{} Your recent work on developer tooling caught my eye \u{2014} would love to chat\"",
            opener
        ))))
    }

    fn provider_name(&self) -> &str {
        "recording"
    }

    fn model_name(&self) -> &str {
        "recording-1"
    }
}

/// Temporary workspace with helpers for writing files into it.
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }
}

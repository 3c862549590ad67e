//! Job, result and progress types shared by the requester and the orchestrator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of a job within one batch run (its original position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub usize);

impl JobId {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub prompt: String,
}

impl Job {
    pub fn new(id: JobId, prompt: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
        }
    }

    /// Build jobs whose identities are their positions in `prompts`.
    pub fn from_prompts<I, S>(prompts: I) -> Vec<Job>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        prompts
            .into_iter()
            .enumerate()
            .map(|(index, prompt)| Job::new(JobId(index), prompt))
            .collect()
    }
}

/// Terminal outcome of one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobResult {
    Success(String),
    Failure(String),
}

impl JobResult {
    pub fn failure(reason: impl Into<String>) -> Self {
        JobResult::Failure(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobResult::Success(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            JobResult::Success(text) => Some(text),
            JobResult::Failure(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            JobResult::Success(_) => None,
            JobResult::Failure(reason) => Some(reason),
        }
    }

    /// Text for display: the message, or an error placeholder for failures.
    pub fn render(&self) -> String {
        match self {
            JobResult::Success(text) => text.clone(),
            JobResult::Failure(reason) => format!("(Error: {})", reason),
        }
    }
}

/// Job identity → result, each identity written exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultMap {
    entries: BTreeMap<JobId, JobResult>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result for `id`. Returns the rejected result if `id` was already recorded.
    pub fn record(&mut self, id: JobId, result: JobResult) -> Result<(), JobResult> {
        use std::collections::btree_map::Entry;
        match self.entries.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(result);
                Ok(())
            }
            Entry::Occupied(_) => Err(result),
        }
    }

    pub fn get(&self, id: JobId) -> Option<&JobResult> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.entries.values().filter(|r| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// Entries in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (JobId, &JobResult)> {
        self.entries.iter().map(|(id, result)| (*id, result))
    }

    pub fn into_inner(self) -> BTreeMap<JobId, JobResult> {
        self.entries
    }
}

/// Cumulative progress emitted after each chunk drains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub chunk_index: usize,
    pub processed: usize,
    pub total: usize,
    pub fraction: f64,
}

impl BatchProgress {
    pub fn new(chunk_index: usize, processed: usize, total: usize) -> Self {
        let fraction = if total == 0 {
            1.0
        } else {
            (processed as f64 / total as f64).min(1.0)
        };
        Self {
            chunk_index,
            processed,
            total,
            fraction,
        }
    }
}

//! Batch generation engine
//!
//! Jobs flow through a [`BatchOrchestrator`], which runs them chunk by chunk with bounded
//! parallelism; each job is handled by a [`RetryingRequester`] that wraps the remote
//! generator with retries, timeouts and output sanitation.

pub mod job;
pub mod orchestrator;
pub mod requester;
pub mod sanitize;

pub use job::{BatchProgress, Job, JobId, JobResult, ResultMap};
pub use orchestrator::{BatchConfig, BatchOrchestrator, BatchReport};
pub use requester::{RetryPolicy, RetryingRequester, EXHAUSTED_REASON};

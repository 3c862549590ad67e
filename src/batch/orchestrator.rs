//! Batch orchestrator: runs jobs chunk by chunk with bounded parallelism.
//! Owns chunking, the per-chunk barrier, fault capture and progress; retry behavior stays in
//! the requester.

use crate::batch::job::{BatchProgress, Job, JobId, JobResult, ResultMap};
use crate::batch::requester::RetryingRequester;
use crate::error::OutreachError;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info};

/// Chunking and parallelism settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Jobs per sequential wave
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Maximum concurrent in-flight requests
    #[serde(default = "default_pool_width")]
    pub pool_width: usize,
}

fn default_chunk_size() -> usize {
    20
}

fn default_pool_width() -> usize {
    5
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            pool_width: default_pool_width(),
        }
    }
}

impl BatchConfig {
    /// Validate batch configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be at least 1".to_string());
        }
        if self.pool_width == 0 {
            return Err("pool_width must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub results: ResultMap,
    pub progress: Vec<BatchProgress>,
}

impl BatchReport {
    pub fn fractions(&self) -> Vec<f64> {
        self.progress.iter().map(|p| p.fraction).collect()
    }
}

/// Runs an ordered job sequence in sequential chunks, each chunk concurrently.
pub struct BatchOrchestrator {
    requester: Arc<RetryingRequester>,
    config: BatchConfig,
    temperature: f32,
    progress_tx: Option<mpsc::UnboundedSender<BatchProgress>>,
}

impl BatchOrchestrator {
    const DEFAULT_TEMPERATURE: f32 = 0.9;

    pub fn new(requester: Arc<RetryingRequester>, config: BatchConfig) -> Self {
        Self {
            requester,
            config,
            temperature: Self::DEFAULT_TEMPERATURE,
            progress_tx: None,
        }
    }

    /// Base temperature handed to the requester for every job.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Stream progress to `tx` as each chunk completes.
    pub fn with_progress_channel(mut self, tx: mpsc::UnboundedSender<BatchProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run every job and return one result per job identity plus the progress sequence.
    ///
    /// Only invalid input fails the run: bad configuration or duplicate job identities.
    /// Individual job failures are recorded in the result map.
    pub async fn run(&self, jobs: Vec<Job>) -> Result<BatchReport, OutreachError> {
        self.config
            .validate()
            .map_err(|e| OutreachError::ConfigError(format!("Batch config: {}", e)))?;
        self.requester
            .policy()
            .validate()
            .map_err(|e| OutreachError::ConfigError(format!("Retry policy: {}", e)))?;
        ensure_unique_ids(&jobs)?;

        if jobs.is_empty() {
            debug!("Batch run with no jobs");
            return Ok(BatchReport::default());
        }

        let total = jobs.len();
        let chunk_count = total.div_ceil(self.config.chunk_size);
        info!(
            total_jobs = total,
            chunk_size = self.config.chunk_size,
            pool_width = self.config.pool_width,
            chunk_count,
            "Batch started"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.pool_width));
        let mut report = BatchReport::default();
        let mut processed = 0usize;

        for (chunk_index, chunk) in jobs.chunks(self.config.chunk_size).enumerate() {
            debug!(chunk_index, chunk_len = chunk.len(), "Chunk started");

            let outcomes = self.run_chunk(chunk, &semaphore).await;
            let mut failed_count = 0usize;
            for (id, result) in outcomes {
                if !result.is_success() {
                    failed_count += 1;
                }
                if report.results.record(id, result).is_err() {
                    error!(job = %id, "Discarding second result for job");
                }
            }

            processed += chunk.len();
            let signal = BatchProgress::new(chunk_index, processed, total);
            info!(
                chunk_index,
                generated_count = chunk.len() - failed_count,
                failed_count,
                processed,
                total,
                fraction = signal.fraction,
                "Chunk completed"
            );
            if let Some(tx) = &self.progress_tx {
                // A dropped receiver only means nobody is watching.
                let _ = tx.send(signal);
            }
            report.progress.push(signal);
        }

        semaphore.close();
        info!(
            total_jobs = total,
            succeeded = report.results.success_count(),
            failed = report.results.failure_count(),
            "Batch completed"
        );
        Ok(report)
    }

    /// Submit every job of one chunk and wait for all of them.
    async fn run_chunk(&self, chunk: &[Job], semaphore: &Arc<Semaphore>) -> Vec<(JobId, JobResult)> {
        let (ids, handles): (Vec<JobId>, Vec<JoinHandle<JobResult>>) = chunk
            .iter()
            .cloned()
            .map(|job| {
                let requester = Arc::clone(&self.requester);
                let semaphore = Arc::clone(semaphore);
                let temperature = self.temperature;
                let id = job.id;
                let handle = tokio::spawn(async move {
                    let Ok(_permit) = semaphore.acquire_owned().await else {
                        return JobResult::failure("worker pool closed");
                    };
                    requester.attempt(&job.prompt, temperature).await
                });
                (id, handle)
            })
            .unzip();

        let joined = join_all(handles).await;

        ids.into_iter()
            .zip(joined)
            .map(|(id, outcome)| match outcome {
                Ok(result) => (id, result),
                Err(err) => {
                    let reason = describe_join_error(err);
                    error!(job = %id, reason = %reason, "Job faulted");
                    (id, JobResult::Failure(reason))
                }
            })
            .collect()
    }
}

fn ensure_unique_ids(jobs: &[Job]) -> Result<(), OutreachError> {
    let mut seen = HashSet::with_capacity(jobs.len());
    for job in jobs {
        if !seen.insert(job.id) {
            return Err(OutreachError::ConfigError(format!(
                "Duplicate job identity {}",
                job.id
            )));
        }
    }
    Ok(())
}

fn describe_join_error(err: JoinError) -> String {
    if err.is_panic() {
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        format!("job panicked: {}", message)
    } else {
        format!("job cancelled: {}", err)
    }
}

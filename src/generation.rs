//! Generation service: turns outreach records into messages.
//!
//! Records are rendered into prompts, wrapped as positional jobs and handed to the batch
//! orchestrator, so result `JobId(i)` always belongs to record `i`.

use crate::batch::{
    BatchConfig, BatchOrchestrator, BatchProgress, BatchReport, Job, JobId, JobResult,
    RetryingRequester,
};
use crate::config::OutreachConfig;
use crate::error::OutreachError;
use crate::prompt::{OutreachRequest, PromptBuilder};
use crate::provider::{GeneratorFactory, RemoteGenerator};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

pub struct GenerationService {
    prompts: PromptBuilder,
    requester: Arc<RetryingRequester>,
    batch: BatchConfig,
    temperature: f32,
}

impl GenerationService {
    pub fn new(generator: Arc<dyn RemoteGenerator>, config: &OutreachConfig) -> Self {
        Self {
            prompts: PromptBuilder::new(),
            requester: Arc::new(RetryingRequester::new(generator, config.retry.clone())),
            batch: config.batch.clone(),
            temperature: config.provider.temperature,
        }
    }

    /// Build the HTTP generator from the provider settings and wrap it.
    pub fn from_config(config: &OutreachConfig) -> Result<Self, OutreachError> {
        let generator = GeneratorFactory::create(&config.provider)?;
        info!(
            provider = generator.provider_name(),
            model = generator.model_name(),
            "Remote generator ready"
        );
        Ok(Self::new(generator, config))
    }

    pub fn batch_config(&self) -> &BatchConfig {
        &self.batch
    }

    /// Generate one message for one record.
    pub async fn generate_one(&self, request: &OutreachRequest) -> JobResult {
        let prompt = self.prompts.render(request);
        self.requester.attempt(&prompt, self.temperature).await
    }

    /// Generate `count` alternative messages for the same record.
    ///
    /// Each variant gets its own rendering, so openers and closings differ between them.
    pub async fn generate_variants(
        &self,
        request: &OutreachRequest,
        count: usize,
    ) -> Result<Vec<JobResult>, OutreachError> {
        let jobs = Job::from_prompts((0..count).map(|_| self.prompts.render(request)));
        let report = self.orchestrator(None).run(jobs).await?;
        Ok(report.results.into_inner().into_values().collect())
    }

    /// Generate a message for every record, in chunks, reporting progress per chunk.
    pub async fn generate_batch(
        &self,
        records: &[OutreachRequest],
        progress_tx: Option<mpsc::UnboundedSender<BatchProgress>>,
    ) -> Result<BatchReport, OutreachError> {
        let jobs: Vec<Job> = records
            .iter()
            .enumerate()
            .map(|(idx, record)| Job::new(JobId(idx), self.prompts.render(record)))
            .collect();
        self.orchestrator(progress_tx).run(jobs).await
    }

    fn orchestrator(
        &self,
        progress_tx: Option<mpsc::UnboundedSender<BatchProgress>>,
    ) -> BatchOrchestrator {
        let orchestrator = BatchOrchestrator::new(Arc::clone(&self.requester), self.batch.clone())
            .with_temperature(self.temperature);
        match progress_tx {
            Some(tx) => orchestrator.with_progress_channel(tx),
            None => orchestrator,
        }
    }
}

//! Property-based tests for chunking, result completeness and progress

use super::test_utils::RecordingGenerator;
use outreach::batch::{
    BatchConfig, BatchOrchestrator, Job, JobId, RetryPolicy, RetryingRequester,
};
use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use std::sync::Arc;

fn run_batch(
    job_count: usize,
    chunk_size: usize,
    pool_width: usize,
) -> (outreach::batch::BatchReport, Arc<RecordingGenerator>) {
    let generator = Arc::new(RecordingGenerator::default());
    let requester = Arc::new(RetryingRequester::new(
        generator.clone(),
        RetryPolicy::default(),
    ));
    let orchestrator = BatchOrchestrator::new(
        requester,
        BatchConfig {
            chunk_size,
            pool_width,
        },
    );
    let jobs = Job::from_prompts(
        (0..job_count).map(|i| format!("Write something.\nBegin with: Hi Person{},", i)),
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();
    let report = runtime.block_on(orchestrator.run(jobs)).unwrap();
    (report, generator)
}

/// Every job ends with exactly one result, and results are keyed by job identity.
#[test]
fn test_every_job_has_exactly_one_result() {
    let mut runner = TestRunner::new(Config::with_cases(48));

    runner
        .run(&(0usize..40, 1usize..9, 1usize..5), |(n, chunk, width)| {
            let (report, generator) = run_batch(n, chunk, width);

            prop_assert_eq!(report.results.len(), n);
            for i in 0..n {
                let text = report.results.get(JobId(i)).and_then(|r| r.text());
                let expected = format!("Person{},", i);
                prop_assert!(text.is_some_and(|t| t.contains(&expected)));
            }
            prop_assert_eq!(generator.call_count(), n);
            Ok(())
        })
        .unwrap();
}

/// Progress has one entry per chunk, never decreases, and ends at exactly 1.0.
#[test]
fn test_progress_is_monotone_and_complete() {
    let mut runner = TestRunner::new(Config::with_cases(48));

    runner
        .run(&(0usize..40, 1usize..9, 1usize..5), |(n, chunk, width)| {
            let (report, _) = run_batch(n, chunk, width);
            let fractions = report.fractions();

            prop_assert_eq!(fractions.len(), n.div_ceil(chunk));
            for pair in fractions.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
            if n > 0 {
                prop_assert_eq!(fractions.last().copied(), Some(1.0));
                prop_assert_eq!(report.progress.last().map(|p| p.processed), Some(n));
            }
            for (idx, progress) in report.progress.iter().enumerate() {
                prop_assert_eq!(progress.chunk_index, idx);
                prop_assert_eq!(progress.processed, ((idx + 1) * chunk).min(n));
            }
            Ok(())
        })
        .unwrap();
}

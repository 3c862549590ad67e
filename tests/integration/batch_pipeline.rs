//! End-to-end batch runs: input file, generation through a recording generator, CSV output.

use super::test_utils::{RecordingGenerator, TestWorkspace};
use outreach::batch::{JobId, EXHAUSTED_REASON};
use outreach::config::OutreachConfig;
use outreach::generation::GenerationService;
use outreach::input::{load_records, load_table};
use outreach::output::{write_results, MESSAGE_COLUMN};
use std::sync::Arc;
use tokio::sync::mpsc;

const LEADS: &str = "\
name,job_role,company,intent,post_or_profile
Ana,CTO,Orbit,hiring,\"We're hiring platform engineers, remote friendly\"
Ben,Designer,Loom,marketing,
Cleo,Founder,Kite,sales,Launching our beta next week
Dev,Researcher,Quanta,collaboration,
Eli,Engineer,Forge,networking,
";

fn config(chunk_size: usize, pool_width: usize) -> OutreachConfig {
    let mut config = OutreachConfig::default();
    config.batch.chunk_size = chunk_size;
    config.batch.pool_width = pool_width;
    config
}

#[tokio::test]
async fn test_csv_batch_writes_one_row_per_record() {
    let ws = TestWorkspace::new();
    let input = ws.write("leads.csv", LEADS);
    let output = ws.path().join("out.csv");

    let table = load_table(&input).unwrap();
    let generator = Arc::new(RecordingGenerator::with_short_replies_for(&["Cleo"]));
    let service = GenerationService::new(generator.clone(), &config(2, 2));

    let report = service.generate_batch(&table.records, None).await.unwrap();
    write_results(&output, &table, &report.results).unwrap();

    assert_eq!(report.fractions(), vec![0.4, 0.8, 1.0]);
    assert_eq!(report.results.success_count(), 4);
    assert_eq!(
        report.results.get(JobId(2)).and_then(|r| r.reason()),
        Some(EXHAUSTED_REASON)
    );
    // Three attempts for the recipient whose replies are always too short.
    assert_eq!(generator.call_count(), 4 + 3);

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(headers.len() - 1), Some(MESSAGE_COLUMN));
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);

    let message = |row: &csv::StringRecord| row.get(headers.len() - 1).unwrap().to_string();
    assert_eq!(rows[0].get(0), Some("Ana"));
    assert_eq!(
        rows[0].get(4),
        Some("We're hiring platform engineers, remote friendly")
    );
    assert!(message(&rows[0]).contains("Ana,"));
    assert!(!message(&rows[0]).contains('\u{2014}'));
    assert!(!message(&rows[0]).starts_with('"'));
    assert!(message(&rows[0]).ends_with('.'));
    assert_eq!(message(&rows[2]), format!("(Error: {})", EXHAUSTED_REASON));
    assert!(message(&rows[4]).contains("Eli,"));
}

#[tokio::test]
async fn test_progress_is_streamed_per_chunk() {
    let ws = TestWorkspace::new();
    let records = load_records(&ws.write("leads.csv", LEADS)).unwrap();
    let service = GenerationService::new(Arc::new(RecordingGenerator::default()), &config(4, 3));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let report = service.generate_batch(&records, Some(tx)).await.unwrap();

    let mut streamed = Vec::new();
    while let Some(progress) = rx.recv().await {
        streamed.push(progress);
    }
    assert_eq!(streamed, report.progress);
    assert_eq!(streamed.len(), 2);
    assert_eq!(streamed[0].processed, 4);
    assert_eq!(streamed[1].fraction, 1.0);
}

#[tokio::test]
async fn test_every_record_gets_its_own_prompt() {
    let ws = TestWorkspace::new();
    let records = load_records(&ws.write("leads.csv", LEADS)).unwrap();
    let generator = Arc::new(RecordingGenerator::default());
    let service = GenerationService::new(generator.clone(), &config(20, 5));

    service.generate_batch(&records, None).await.unwrap();

    let by_opener = generator.calls_by_opener();
    assert_eq!(by_opener.len(), 5);
    assert!(by_opener.values().all(|&count| count == 1));
}

#[tokio::test]
async fn test_empty_input_file_produces_header_only_output() {
    let ws = TestWorkspace::new();
    let input = ws.write("leads.csv", "name,job_role,company,intent,post_or_profile\n");
    let output = ws.path().join("out.csv");
    let generator = Arc::new(RecordingGenerator::default());
    let service = GenerationService::new(generator.clone(), &config(20, 5));

    let table = load_table(&input).unwrap();
    let report = service.generate_batch(&table.records, None).await.unwrap();
    write_results(&output, &table, &report.results).unwrap();

    assert!(report.progress.is_empty());
    assert_eq!(generator.call_count(), 0);
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 1);
}

#[tokio::test]
async fn test_output_echoes_input_columns_as_written() {
    let ws = TestWorkspace::new();
    let input = ws.write(
        "leads.csv",
        "Name,email,job_role,company,intent,post_or_profile\n\
         Ana,ana@orbit.io,CTO,Orbit,Recruiting,\n\
         Ben,ben@loom.io,Designer,Loom,networking,Shipping a new design system\n",
    );
    let output = ws.path().join("out.csv");
    let service = GenerationService::new(Arc::new(RecordingGenerator::default()), &config(20, 2));

    let table = load_table(&input).unwrap();
    let report = service.generate_batch(&table.records, None).await.unwrap();
    write_results(&output, &table, &report.results).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(
        headers,
        vec!["Name", "email", "job_role", "company", "intent", "post_or_profile", MESSAGE_COLUMN]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get(1), Some("ana@orbit.io"));
    assert_eq!(rows[0].get(4), Some("Recruiting"));
    assert_eq!(rows[1].get(5), Some("Shipping a new design system"));
    assert!(rows[0].get(6).unwrap().contains("Ana,"));
    assert!(rows[1].get(6).unwrap().contains("Ben,"));
}

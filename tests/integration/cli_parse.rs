//! Command-line parsing

use clap::Parser;
use outreach::cli::{command_name, Cli, Commands, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_batch_command_parses_overrides() {
    let cli = Cli::try_parse_from([
        "outreach",
        "--workspace",
        "/tmp/ws",
        "batch",
        "--input",
        "leads.csv",
        "--output",
        "messages.csv",
        "--chunk-size",
        "10",
        "--pool-width",
        "3",
        "--format",
        "json",
    ])
    .unwrap();

    assert_eq!(cli.workspace, PathBuf::from("/tmp/ws"));
    assert_eq!(command_name(&cli.command), "batch");
    let Commands::Batch(args) = cli.command else {
        panic!("expected batch command");
    };
    assert_eq!(args.input, PathBuf::from("leads.csv"));
    assert_eq!(args.output, PathBuf::from("messages.csv"));
    assert_eq!(args.chunk_size, Some(10));
    assert_eq!(args.pool_width, Some(3));
    assert_eq!(args.max_attempts, None);
    assert_eq!(args.preview, 20);
    assert_eq!(args.format, OutputFormat::Json);
}

#[test]
fn test_batch_defaults() {
    let cli = Cli::try_parse_from(["outreach", "batch", "-i", "leads.txt"]).unwrap();
    let Commands::Batch(args) = cli.command else {
        panic!("expected batch command");
    };
    assert_eq!(args.output, PathBuf::from("generated_messages.csv"));
    assert_eq!(args.format, OutputFormat::Text);
}

#[test]
fn test_batch_requires_input() {
    assert!(Cli::try_parse_from(["outreach", "batch"]).is_err());
}

#[test]
fn test_generate_fields_are_optional() {
    let cli = Cli::try_parse_from([
        "outreach",
        "generate",
        "--name",
        "Priya Desai",
        "--variants",
        "3",
    ])
    .unwrap();
    let Commands::Generate(args) = cli.command else {
        panic!("expected generate command");
    };
    assert_eq!(args.name.as_deref(), Some("Priya Desai"));
    assert_eq!(args.company, None);
    assert_eq!(args.variants, 3);
    assert!(!args.no_input);
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    assert!(Cli::try_parse_from(["outreach", "--quiet", "--verbose", "generate"]).is_err());
}

#[test]
fn test_global_logging_flags() {
    let cli = Cli::try_parse_from([
        "outreach",
        "--log-level",
        "trace",
        "--log-format",
        "json",
        "--log-output",
        "file",
        "--log-file",
        "/tmp/outreach.log",
        "generate",
    ])
    .unwrap();
    assert_eq!(cli.log_level.as_deref(), Some("trace"));
    assert_eq!(cli.log_format.as_deref(), Some("json"));
    assert_eq!(cli.log_output.as_deref(), Some("file"));
    assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/outreach.log")));
}

//! CLI parse: clap types for outreach. No behavior; definitions only.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Outreach CLI - personalized outreach messages, one at a time or in batches
#[derive(Parser)]
#[command(name = "outreach")]
#[command(about = "Generate personalized outreach messages with a hosted language model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/ and .outreach/ live here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a message for a single recipient
    Generate(GenerateArgs),
    /// Generate messages for every record in an input file
    Batch(BatchArgs),
}

/// Recipient fields; anything missing is asked for interactively.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Recipient name
    #[arg(long)]
    pub name: Option<String>,

    /// Recipient job role
    #[arg(long)]
    pub role: Option<String>,

    /// Recipient company
    #[arg(long)]
    pub company: Option<String>,

    /// Purpose (hiring, marketing, sales, partnership, networking, collaboration)
    #[arg(long)]
    pub intent: Option<String>,

    /// Text from the recipient's post or profile
    #[arg(long)]
    pub post: Option<String>,

    /// Sender perspective (job applicant, recruiter, peer, networker)
    #[arg(long)]
    pub perspective: Option<String>,

    /// Number of alternative messages to generate
    #[arg(long, default_value = "1")]
    pub variants: usize,

    /// Never prompt; fail if a required field is missing
    #[arg(long)]
    pub no_input: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Input file (.csv, .json, or comma-separated .txt)
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Output CSV path
    #[arg(long, short = 'o', default_value = "generated_messages.csv")]
    pub output: PathBuf,

    /// Records per sequential chunk (overrides batch.chunk_size)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Concurrent requests within a chunk (overrides batch.pool_width)
    #[arg(long)]
    pub pool_width: Option<usize>,

    /// Attempts per record (overrides retry.max_attempts)
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Sender perspective applied to every record
    #[arg(long)]
    pub perspective: Option<String>,

    /// Rows shown in the preview table
    #[arg(long, default_value = "20")]
    pub preview: usize,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

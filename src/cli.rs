//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{BatchArgs, Cli, Commands, GenerateArgs, OutputFormat};
pub use presentation::{
    format_batch_json, format_batch_summary, format_generate_json, format_generate_text,
    format_progress_line, format_section_heading,
};
pub use route::{command_name, RunContext};

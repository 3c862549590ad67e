//! CLI presentation: text and json formatters per command.

mod batch;
mod generate;
mod shared;

pub use batch::{format_batch_json, format_batch_summary, format_progress_line};
pub use generate::{format_generate_json, format_generate_text};
pub use shared::format_section_heading;

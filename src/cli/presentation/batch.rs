//! Presentation for `outreach batch`: progress lines, summary and preview table.

use super::shared::{format_section_heading, truncate_cell};
use crate::batch::{BatchProgress, BatchReport, JobId, JobResult};
use crate::error::OutreachError;
use crate::prompt::OutreachRequest;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::path::Path;

const BAR_WIDTH: usize = 24;
const MESSAGE_CELL_CHARS: usize = 90;

/// One line per completed chunk, e.g. `[#########...] 40% (2/5) chunk 1`.
pub fn format_progress_line(progress: &BatchProgress) -> String {
    let filled = ((progress.fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!(
        "[{}{}] {:>3}% ({}/{}) chunk {}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        (progress.fraction * 100.0).round() as u32,
        progress.processed,
        progress.total,
        progress.chunk_index + 1
    )
}

pub fn format_batch_summary(
    records: &[OutreachRequest],
    report: &BatchReport,
    output_path: &Path,
    preview_rows: usize,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Batch complete")));
    out.push_str(&format!(
        "  Generated: {}\n  Failed: {}\n  Written to: {}\n",
        report.results.success_count().green(),
        report.results.failure_count().red(),
        output_path.display()
    ));

    if records.is_empty() || preview_rows == 0 {
        return out;
    }

    let shown = records.len().min(preview_rows);
    out.push_str(&format!(
        "\n{}\n\n",
        format_section_heading(&format!("Preview ({} of {})", shown, records.len()))
    ));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Company", "Intent", "Message"]);
    for (idx, record) in records.iter().take(shown).enumerate() {
        let message = match report.results.get(JobId(idx)) {
            Some(JobResult::Success(text)) => truncate_cell(text, MESSAGE_CELL_CHARS),
            Some(failure) => failure.render(),
            None => "-".to_string(),
        };
        table.add_row(vec![
            (idx + 1).to_string(),
            record.name.clone(),
            record.company.clone(),
            record.intent.as_str().to_string(),
            message,
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_batch_json(report: &BatchReport, output_path: &Path) -> Result<String, OutreachError> {
    let out = serde_json::json!({
        "total": report.results.len(),
        "generated": report.results.success_count(),
        "failed": report.results.failure_count(),
        "progress": report.fractions(),
        "output": output_path.display().to_string(),
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

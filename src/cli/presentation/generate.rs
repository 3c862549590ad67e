//! Presentation for `outreach generate`.

use super::shared::format_section_heading;
use crate::batch::JobResult;
use crate::error::OutreachError;
use crate::prompt::OutreachRequest;
use owo_colors::OwoColorize;

pub fn format_generate_text(request: &OutreachRequest, results: &[JobResult]) -> String {
    let mut out = format!(
        "{}\n",
        format_section_heading(&format!("Message for {} ({})", request.name, request.company))
    );
    for (idx, result) in results.iter().enumerate() {
        if results.len() > 1 {
            out.push_str(&format!("\n{}\n", format!("Variant {}", idx + 1).bold()));
        } else {
            out.push('\n');
        }
        match result {
            JobResult::Success(text) => out.push_str(text),
            JobResult::Failure(reason) => {
                out.push_str(&format!("{}", format!("(Error: {})", reason).red()))
            }
        }
        out.push('\n');
    }
    out
}

pub fn format_generate_json(
    request: &OutreachRequest,
    results: &[JobResult],
) -> Result<String, OutreachError> {
    let messages: Vec<serde_json::Value> = results
        .iter()
        .map(|result| match result {
            JobResult::Success(text) => serde_json::json!({ "ok": true, "message": text }),
            JobResult::Failure(reason) => serde_json::json!({ "ok": false, "error": reason }),
        })
        .collect();
    let out = serde_json::json!({ "request": request, "messages": messages });
    Ok(serde_json::to_string_pretty(&out)?)
}

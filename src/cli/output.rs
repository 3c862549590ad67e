//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::OutreachError;

/// Map domain/service errors to a message for CLI output, with a hint where one helps.
pub fn map_error(e: &OutreachError) -> String {
    match e {
        OutreachError::ProviderNotConfigured(_) => format!(
            "{}\nhint: export the API key variable named by provider.api_key_env",
            e
        ),
        OutreachError::MissingColumns(_) => format!(
            "{}\nhint: expected columns are name, job_role, company, intent, post_or_profile",
            e
        ),
        _ => e.to_string(),
    }
}

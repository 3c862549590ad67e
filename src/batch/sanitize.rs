//! Output sanitation: punctuation normalization, trimming and the length/termination rules.

use std::fmt;

/// Generated text that failed the quality rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityRejection {
    pub chars: usize,
    pub min_chars: usize,
}

impl fmt::Display for QualityRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "output too short ({} chars, minimum {})",
            self.chars, self.min_chars
        )
    }
}

/// Replace typographic dashes and ellipses, then strip surrounding whitespace and quotes.
pub fn normalize(raw: &str) -> String {
    let replaced = raw
        .replace(['\u{2014}', '\u{2013}'], "-")
        .replace('\u{2026}', ".");
    replaced.trim().trim_matches('"').trim().to_string()
}

/// Normalize `raw` and enforce the minimum length; unterminated text gets a period.
pub fn sanitize_output(raw: &str, min_chars: usize) -> Result<String, QualityRejection> {
    let mut text = normalize(raw);

    let chars = text.chars().count();
    if chars < min_chars {
        return Err(QualityRejection { chars, min_chars });
    }

    if !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    Ok(text)
}

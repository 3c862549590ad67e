//! Input file loading for batch runs.
//!
//! Three formats are accepted, chosen by extension: `.csv` with a header row, `.json` holding
//! an array of objects, and anything else as plain comma-separated lines in the fixed column
//! order `name, job_role, company, intent, post_or_profile`.
//!
//! Besides the parsed records, every loader keeps the file's own columns and cell text so the
//! result file can echo them back unchanged.

use crate::error::OutreachError;
use crate::prompt::{Intent, OutreachRequest, SenderPerspective};
use csv::{ReaderBuilder, Trim};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Columns every input must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = ["name", "job_role", "company", "intent", "post_or_profile"];

/// Optional column; defaults to a job applicant when absent.
pub const PERSPECTIVE_COLUMN: &str = "sender_perspective";

/// A loaded input file.
///
/// `headers` are the column names as written in the file, in file order. `rows[i]` holds the
/// cell text of record `i`, one entry per header. `records[i]` is the parsed request for the
/// same row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub records: Vec<OutreachRequest>,
}

impl InputTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load outreach records from `path`, in file order.
pub fn load_records(path: &Path) -> Result<Vec<OutreachRequest>, OutreachError> {
    Ok(load_table(path)?.records)
}

/// Load `path` keeping its original columns alongside the parsed records.
pub fn load_table(path: &Path) -> Result<InputTable, OutreachError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let table = match extension.as_deref() {
        Some("csv") => load_csv(path)?,
        Some("json") => load_json(path)?,
        _ => load_text(path)?,
    };
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        records = table.len(),
        "Loaded input records"
    );
    Ok(table)
}

fn load_csv(path: &Path) -> Result<InputTable, OutreachError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    check_columns(lowered.iter().map(String::as_str))?;

    let index: HashMap<&str, usize> = lowered
        .iter()
        .enumerate()
        .rev()
        .map(|(i, h)| (h.as_str(), i))
        .collect();

    let mut rows = Vec::new();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cells: Vec<String> = (0..headers.len())
            .map(|i| row.get(i).unwrap_or_default().to_string())
            .collect();
        records.push(build_record(|column| {
            index.get(column).and_then(|&i| cells.get(i).cloned())
        }));
        rows.push(cells);
    }
    Ok(InputTable {
        headers,
        rows,
        records,
    })
}

fn load_json(path: &Path) -> Result<InputTable, OutreachError> {
    let contents = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    let Value::Array(items) = value else {
        return Err(OutreachError::InvalidInput {
            path: path.to_path_buf(),
            message: "expected a JSON array of objects".to_string(),
        });
    };

    // Keys are matched case-insensitively; a column keeps the spelling it was first seen with.
    let mut headers: Vec<String> = Vec::new();
    let mut lowered: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let Value::Object(map) = item else {
            return Err(OutreachError::InvalidInput {
                path: path.to_path_buf(),
                message: format!("entry {} is not an object", position),
            });
        };
        let mut object: HashMap<String, Value> = HashMap::with_capacity(map.len());
        for (key, value) in map {
            let key = key.trim().to_string();
            let lower = key.to_lowercase();
            if !lowered.contains(&lower) {
                lowered.push(lower.clone());
                headers.push(key);
            }
            object.entry(lower).or_insert(value);
        }
        objects.push(object);
    }

    if !objects.is_empty() {
        check_columns(lowered.iter().map(String::as_str))?;
    }

    let rows: Vec<Vec<String>> = objects
        .iter()
        .map(|object| {
            lowered
                .iter()
                .map(|column| object.get(column).map(json_to_string).unwrap_or_default())
                .collect()
        })
        .collect();
    let records = objects
        .iter()
        .map(|object| build_record(|column| object.get(column).map(json_to_string)))
        .collect();
    Ok(InputTable {
        headers,
        rows,
        records,
    })
}

fn load_text(path: &Path) -> Result<InputTable, OutreachError> {
    let contents = std::fs::read_to_string(path)?;
    let mut rows = Vec::new();
    let mut records = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        // The post is the last column and may itself contain commas.
        let fields: Vec<&str> = line.splitn(REQUIRED_COLUMNS.len(), ',').collect();
        if fields.len() < REQUIRED_COLUMNS.len() - 1 {
            return Err(OutreachError::InvalidInput {
                path: path.to_path_buf(),
                message: format!(
                    "line {}: expected {} comma-separated fields, found {}",
                    line_no + 1,
                    REQUIRED_COLUMNS.len(),
                    fields.len()
                ),
            });
        }
        let cells: Vec<String> = (0..REQUIRED_COLUMNS.len())
            .map(|i| fields.get(i).map(|f| f.trim().to_string()).unwrap_or_default())
            .collect();
        records.push(build_record(|column| {
            REQUIRED_COLUMNS
                .iter()
                .position(|c| *c == column)
                .and_then(|i| cells.get(i).cloned())
        }));
        rows.push(cells);
    }
    Ok(InputTable {
        headers: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
        records,
    })
}

fn check_columns<'a>(present: impl Iterator<Item = &'a str>) -> Result<(), OutreachError> {
    let present: Vec<&str> = present.collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !present.contains(column))
        .map(|column| column.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(OutreachError::MissingColumns(missing))
    }
}

fn build_record(field: impl Fn(&str) -> Option<String>) -> OutreachRequest {
    let text = |column: &str| field(column).map(|v| v.trim().to_string()).unwrap_or_default();

    let mut request = OutreachRequest::new(
        text("name"),
        text("job_role"),
        text("company"),
        Intent::parse(&text("intent")),
    )
    .with_post(text("post_or_profile"));

    if let Some(perspective) = field(PERSPECTIVE_COLUMN).filter(|p| !p.trim().is_empty()) {
        request = request.with_perspective(SenderPerspective::parse(&perspective));
    }
    request
}

fn json_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

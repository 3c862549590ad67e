//! Input loading across the supported file formats

use super::test_utils::TestWorkspace;
use outreach::error::OutreachError;
use outreach::input::load_records;
use outreach::prompt::{Intent, SenderPerspective};

#[test]
fn test_same_records_from_every_format() {
    let ws = TestWorkspace::new();
    let csv = ws.write(
        "leads.csv",
        "name,job_role,company,intent,post_or_profile\n\
         Ana,CTO,Orbit,hiring,Growing the team\n\
         Ben,Designer,Loom,partnership,\n",
    );
    let json = ws.write(
        "leads.json",
        r#"[
  {"name": "Ana", "job_role": "CTO", "company": "Orbit", "intent": "hiring", "post_or_profile": "Growing the team"},
  {"name": "Ben", "job_role": "Designer", "company": "Loom", "intent": "partnership", "post_or_profile": ""}
]"#,
    );
    let txt = ws.write(
        "leads.txt",
        "Ana,CTO,Orbit,hiring,Growing the team\nBen,Designer,Loom,partnership,\n",
    );

    let from_csv = load_records(&csv).unwrap();
    assert_eq!(from_csv.len(), 2);
    assert_eq!(from_csv[1].intent, Intent::Partnership);
    assert_eq!(from_csv[1].post_or_profile, None);
    assert_eq!(from_csv[0].sender_perspective, SenderPerspective::JobApplicant);
    assert_eq!(load_records(&json).unwrap(), from_csv);
    assert_eq!(load_records(&txt).unwrap(), from_csv);
}

#[test]
fn test_json_missing_columns_reported_together() {
    let ws = TestWorkspace::new();
    let path = ws.write("leads.json", r#"[{"name": "Ana", "company": "Orbit"}]"#);

    let err = load_records(&path).unwrap_err();
    assert!(matches!(err, OutreachError::MissingColumns(ref cols) if cols.len() == 3));
    assert_eq!(
        err.to_string(),
        "Missing required columns: job_role, intent, post_or_profile"
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let ws = TestWorkspace::new();
    assert!(load_records(&ws.path().join("nope.csv")).is_err());
}

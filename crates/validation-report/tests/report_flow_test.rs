//! Integration tests for the report as a validator drives it
//!
//! A small rule walker stands in for the validation engine: it descends into a
//! JSON value, counts checks and records issues, including nested reports
//! produced on worker threads and merged back into the parent.

use serde_json::{json, Value};
use std::sync::Arc;
use validation_report::{IssueDetails, IssuePath, Report, ReportError, ReportOptions};

/// Check that every listed field of `value` is a string
fn check_strings(
    report: &mut Report,
    value: &Value,
    path: &IssuePath,
    fields: &[&str],
) -> anyhow::Result<()> {
    for field in fields {
        report.record_check();
        let child = path.child(*field);
        match value.get(field) {
            Some(Value::String(_)) => {}
            Some(other) => report.add_issue_at(
                child,
                "string",
                Some(IssueDetails::new().with_value(other.clone()).with_accept("string")),
            )?,
            None => report.add_issue_at(child, "required", None)?,
        }
    }
    Ok(())
}

fn validate_user(value: Arc<Value>) -> anyhow::Result<Report> {
    let mut report = Report::for_value(Arc::clone(&value));
    check_strings(&mut report, &value, &IssuePath::root(), &["name", "email"])?;

    let images = value.get("images").and_then(Value::as_array).cloned().unwrap_or_default();
    let children = std::thread::scope(|scope| {
        let handles: Vec<_> = images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                scope.spawn(move || -> anyhow::Result<Report> {
                    let mut child = Report::new();
                    let path = IssuePath::from(["images"]).child(index);
                    check_strings(&mut child, image, &path, &["path"])?;
                    Ok(child)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    for child in &children {
        report.merge(child);
    }
    Ok(report)
}

#[test]
fn test_valid_input_produces_empty_report() -> anyhow::Result<()> {
    let value = Arc::new(json!({
        "name": "joe",
        "email": "joe@example.com",
        "images": [{"path": "a.png"}, {"path": "b.png"}],
    }));

    let report = validate_user(Arc::clone(&value))?;
    assert!(!report.has_issues());
    assert_eq!(report.check_count(), 4);
    assert_eq!(report.value(), Some(value.as_ref()));
    assert_eq!(report.to_json()?, json!([]));
    Ok(())
}

#[test]
fn test_invalid_input_is_fully_described() -> anyhow::Result<()> {
    let value = Arc::new(json!({
        "name": 42,
        "images": [{"path": "a.png"}, {"path": null}],
    }));

    let report = validate_user(value)?;
    assert!(report.has_issues());
    assert_eq!(report.issue_count(), 3);

    assert!(report.has_issue("name"));
    assert!(report.has_issue("email"));
    assert!(report.has_issue("images.1.path"));
    assert!(!report.has_issue("images.0.path"));

    let name = report.find_issue("name", Some("string")).expect("name issue");
    let details = name.details.as_ref().expect("details");
    assert_eq!(details.value().map(|v| v.to_json()), Some(json!(42)));

    assert!(report.find_issue("email", Some("string")).is_none());
    let email = report.find_issue("email", Some("required"));
    assert_eq!(email.map(|i| i.rule.as_str()), Some("required"));

    let image = report
        .find_issue_by(|issue| issue.path.starts_with(&IssuePath::from(["images"])))
        .expect("image issue");
    assert_eq!(image.path.to_string(), "images.1.path");
    Ok(())
}

#[test]
fn test_report_json_feeds_a_new_report() -> anyhow::Result<()> {
    let report = validate_user(Arc::new(json!({"name": "joe"})))?;
    let serialized = serde_json::to_string(&report)?;

    let options = ReportOptions::from_json_str(&format!(
        r#"{{"issues": {serialized}, "value": {{"name": "joe"}}}}"#
    ))?;
    let restored = Report::with_options(options)?;

    assert_eq!(restored.get_issues(), report.get_issues());
    assert_eq!(restored.value(), Some(&json!({"name": "joe"})));
    assert_eq!(restored.check_count(), 0);
    Ok(())
}

#[test]
fn test_options_loaded_from_file() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("validation-report-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let file = dir.join("options.json");
    std::fs::write(&file, r#"{"issues": [{"path": ["username"], "rule": "uniq"}]}"#)?;

    let report = Report::with_options(ReportOptions::load(&file)?)?;
    assert!(report.has_issue("username"));

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn test_missing_options_file_is_a_configuration_error() {
    let err = ReportOptions::load(std::path::Path::new("/nonexistent/options.json")).unwrap_err();
    assert!(matches!(err, ReportError::Configuration { .. }));
    assert!(!err.is_malformed_issue());
}

#[test]
fn test_malformed_options_are_json_errors() {
    let err = ReportOptions::from_json_str(r#"{"issues": 3}"#).unwrap_err();
    assert!(matches!(err, ReportError::Json { .. }));
}

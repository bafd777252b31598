//! Construction options for a report
//!
//! Options can be assembled in code or loaded from JSON, which lets a host
//! seed a report from the issues of an earlier (or nested) validation pass.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Options accepted by [`Report::with_options`](crate::Report::with_options)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Issue records to seed the report with, normalized like any added issue
    pub issues: Vec<Value>,

    /// The value being validated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, issue: Value) -> Self {
        self.issues.push(issue);
        self
    }

    pub fn with_issues(mut self, issues: impl IntoIterator<Item = Value>) -> Self {
        self.issues.extend(issues);
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Parse options from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load options from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

//! Report construction, mutation and snapshots
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::options::ReportOptions;
use crate::detail::IssueDetails;
use crate::error::Result;
use crate::issue::{IntoIssue, Issue};
use crate::path::IssuePath;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Once};
use tracing::{debug, warn};

static IS_VALID_DEPRECATION: Once = Once::new();

/// Issues collected during one validation pass
///
/// A report starts out valid and becomes invalid with the first recorded
/// issue. Issues are append-only; there is no way to remove one. The validated
/// value is held by shared reference and never copied or inspected.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub(super) issues: Vec<Issue>,
    value: Option<Arc<Value>>,
    check_count: usize,
}

impl Report {
    /// Create an empty, valid report
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a report from options, normalizing every seeded issue
    pub fn with_options(options: ReportOptions) -> Result<Self> {
        let mut report = Self::new();
        report.set_issues(options.issues)?;
        if let Some(value) = options.value {
            report.set_value(value);
        }
        Ok(report)
    }

    pub fn from_issues<I, T>(issues: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: IntoIssue,
    {
        let mut report = Self::new();
        report.set_issues(issues)?;
        Ok(report)
    }

    /// Create an empty report for the given value
    pub fn for_value(value: impl Into<Arc<Value>>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Record an issue
    ///
    /// Accepts a typed [`Issue`] or a JSON issue record. The stored issue is an
    /// independent copy. A malformed issue is rejected and nothing is recorded.
    pub fn add_issue<I: IntoIssue>(&mut self, issue: I) -> Result<()> {
        let issue = issue.into_issue()?;
        debug!(rule = %issue.rule, path = %issue.path, "recorded validation issue");
        self.issues.push(issue);
        Ok(())
    }

    /// Record an issue from its parts
    pub fn add_issue_at(
        &mut self,
        path: impl Into<IssuePath>,
        rule: impl Into<String>,
        details: Option<IssueDetails>,
    ) -> Result<()> {
        let mut issue = Issue::new(path, rule);
        issue.details = details;
        self.add_issue(issue)
    }

    /// Record several issues in order
    ///
    /// Every issue is normalized before any is stored, so one malformed entry
    /// leaves the report untouched.
    pub fn set_issues<I, T>(&mut self, issues: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: IntoIssue,
    {
        let normalized = issues
            .into_iter()
            .map(IntoIssue::into_issue)
            .collect::<Result<Vec<_>>>()?;

        for issue in &normalized {
            debug!(rule = %issue.rule, path = %issue.path, "recorded validation issue");
        }
        self.issues.extend(normalized);
        Ok(self)
    }

    /// Append the issues and check count of a nested report
    pub fn merge(&mut self, child: &Report) -> &mut Self {
        debug!(issues = child.issues.len(), "merging nested report");
        self.issues.extend(child.issues.iter().cloned());
        self.check_count += child.check_count;
        self
    }

    /// Whether at least one issue was recorded
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Whether no issue was recorded
    #[deprecated(since = "0.1.0", note = "use `!report.has_issues()` instead")]
    pub fn is_valid(&self) -> bool {
        IS_VALID_DEPRECATION.call_once(|| {
            warn!("report.is_valid is deprecated: use report.has_issues instead");
        });
        !self.has_issues()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Stored issues, read-only
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Independent copy of all issues in insertion order
    pub fn get_issues(&self) -> Vec<Issue> {
        self.issues.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// The issues as a JSON array; the validated value and check count are left out
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.issues)?)
    }

    /// The validated value, if one was attached
    pub fn value(&self) -> Option<&Value> {
        self.value.as_deref()
    }

    /// Shared handle to the validated value
    pub fn value_handle(&self) -> Option<Arc<Value>> {
        self.value.clone()
    }

    pub fn set_value(&mut self, value: impl Into<Arc<Value>>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    /// Number of rule checks the validator reported
    pub fn check_count(&self) -> usize {
        self.check_count
    }

    pub fn record_check(&mut self) {
        self.check_count += 1;
    }

    pub fn record_checks(&mut self, count: usize) {
        self.check_count += count;
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.issues)
    }
}

impl<'de> Deserialize<'de> for Report {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let records = Vec::<Value>::deserialize(deserializer)?;
        Report::from_issues(records).map_err(de::Error::custom)
    }
}

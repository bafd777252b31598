//! Validation issue records and their normalization
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::detail::{DetailValue, IssueDetails};
use crate::error::{json_type_name, ReportError, Result};
use crate::path::IssuePath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

const PATH_FIELD: &str = "path";
const RULE_FIELD: &str = "rule";
const DETAILS_FIELD: &str = "details";

fn is_reserved(key: &str) -> bool {
    matches!(key, PATH_FIELD | RULE_FIELD | DETAILS_FIELD)
}

/// One recorded rule violation
///
/// `extra` holds any additional top-level fields found on a loosely typed
/// issue record; they are serialized back next to `path` and `rule`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Issue {
    pub path: IssuePath,
    pub rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<IssueDetails>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, DetailValue>,
}

impl Issue {
    pub fn new(path: impl Into<IssuePath>, rule: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            rule: rule.into(),
            details: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_details(mut self, details: IssueDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach an extra top-level field
    ///
    /// `path`, `rule` and `details` are reserved and ignored here; set the
    /// typed fields instead.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<DetailValue>) -> Self {
        let key = key.into();
        if !is_reserved(&key) {
            self.extra.insert(key, value.into());
        }
        self
    }

    /// Normalize a loosely typed issue record
    ///
    /// A missing path means the whole value, a dotted string path is split on
    /// `.`, and the rule must be a non-empty string. Checks run in that order so
    /// a record with both a bad path and a bad rule reports the path.
    pub fn from_json(record: &Value) -> Result<Self> {
        let fields = record
            .as_object()
            .ok_or_else(|| ReportError::invalid_issue(record))?;

        let path = match fields.get(PATH_FIELD) {
            Some(path) => IssuePath::from_json(path)?,
            None => IssuePath::root(),
        };

        let rule = match fields.get(RULE_FIELD) {
            Some(Value::String(rule)) if !rule.is_empty() => rule.clone(),
            Some(Value::String(_)) => return Err(ReportError::invalid_rule("empty string")),
            Some(other) => return Err(ReportError::invalid_rule(json_type_name(other))),
            None => return Err(ReportError::invalid_rule("missing")),
        };

        let details = match fields.get(DETAILS_FIELD) {
            Some(details) => IssueDetails::from_json(details),
            None => None,
        };

        let extra = fields
            .iter()
            .filter(|(key, _)| !is_reserved(key))
            .map(|(key, value)| (key.clone(), DetailValue::Plain(value.clone())))
            .collect();

        Ok(Self {
            path,
            rule,
            details,
            extra,
        })
    }

    /// Check the invariants a typed issue cannot express on its own
    pub fn validated(self) -> Result<Self> {
        if self.rule.is_empty() {
            return Err(ReportError::invalid_rule("empty string"));
        }
        if let Some(key) = self.extra.keys().find(|key| is_reserved(key)) {
            return Err(ReportError::reserved_field(key));
        }
        Ok(self)
    }

    /// Whether this issue is recorded against the whole value
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.rule)
        } else {
            write!(f, "{}: {}", self.path, self.rule)
        }
    }
}

impl TryFrom<Value> for Issue {
    type Error = ReportError;

    fn try_from(record: Value) -> Result<Self> {
        Self::from_json(&record)
    }
}

/// Conversion into a normalized, independently owned issue
///
/// Implemented for typed issues and for loosely typed JSON records, so both
/// can be handed to [`Report::add_issue`](crate::Report::add_issue).
pub trait IntoIssue {
    fn into_issue(self) -> Result<Issue>;
}

impl IntoIssue for Issue {
    fn into_issue(self) -> Result<Issue> {
        self.validated()
    }
}

impl IntoIssue for &Issue {
    fn into_issue(self) -> Result<Issue> {
        self.clone().validated()
    }
}

impl IntoIssue for Value {
    fn into_issue(self) -> Result<Issue> {
        Issue::from_json(&self)
    }
}

impl IntoIssue for &Value {
    fn into_issue(self) -> Result<Issue> {
        Issue::from_json(self)
    }
}

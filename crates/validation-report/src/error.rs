//! Error types for the validation report
//!
//! This module defines the errors raised while normalizing issues on their way
//! into a report, using thiserror for ergonomic error definitions.

use serde_json::Value;
use thiserror::Error;

/// Main error type for report operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// The issue record is not a structured object, or its extra fields clash
    /// with the reserved ones
    #[error("{message} (found {found})")]
    InvalidIssue {
        message: String,
        found: String,
    },

    /// The issue path is not an ordered sequence of segments
    #[error("Path should be an array (found {found})")]
    InvalidPath {
        found: String,
    },

    /// The issue has no usable rule name
    #[error("Issue should have a rule property (found {found})")]
    InvalidRule {
        found: String,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

/// Convenience type alias for Results using our error type
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    pub(crate) fn invalid_issue(value: &Value) -> Self {
        ReportError::InvalidIssue {
            message: "Issue should be an object".to_string(),
            found: json_type_name(value).to_string(),
        }
    }

    pub(crate) fn reserved_field(key: &str) -> Self {
        ReportError::InvalidIssue {
            message: "Issue extra fields should not replace path, rule or details".to_string(),
            found: key.to_string(),
        }
    }

    pub(crate) fn invalid_path(value: &Value) -> Self {
        ReportError::InvalidPath {
            found: json_type_name(value).to_string(),
        }
    }

    pub(crate) fn invalid_rule(found: impl Into<String>) -> Self {
        ReportError::InvalidRule {
            found: found.into(),
        }
    }

    /// Whether this error was caused by a malformed issue rather than I/O or parsing
    pub fn is_malformed_issue(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidIssue { .. }
                | ReportError::InvalidPath { .. }
                | ReportError::InvalidRule { .. }
        )
    }
}

/// Name of a JSON value's type, as reported in error messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Configuration {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

//! Validation Report - accumulate and query validation issues
//!
//! This crate provides the report a validation engine fills in while checking
//! an input value against its rules. Each issue records where the check failed
//! (a path into the value), which rule failed, and optional details.
//!
//! # Main Components
//!
//! - **Paths**: key/index segment paths with dotted-string shorthand
//! - **Details**: opaque payloads with an explicit clone-or-share policy
//! - **Issues**: typed issue records and normalization of loose JSON records
//! - **Report**: the append-only issue collection with its lookups
//! - **Error Handling**: error types using `thiserror`
//!
//! # Example
//!
//! ```
//! use validation_report::{IssueDetails, Report, Result};
//!
//! fn example() -> Result<()> {
//!     let mut report = Report::new();
//!     report.add_issue_at("user.name", "uniq", Some(IssueDetails::new().with_accept(true)))?;
//!
//!     assert!(report.has_issues());
//!     assert!(report.has_issue("user.name"));
//!     let issue = report.find_issue("user.name", Some("uniq"));
//!     assert_eq!(issue.map(|i| i.rule.as_str()), Some("uniq"));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod detail;
pub mod error;
pub mod issue;
pub mod path;
pub mod report;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use detail::{DetailValue, IssueDetails, OpaqueDetail, OpaqueValue};
pub use error::{ReportError, Result};
pub use issue::{IntoIssue, Issue};
pub use path::{IssuePath, PathQuery, PathSegment};
pub use report::{Report, ReportOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

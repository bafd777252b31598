//! Path and rule lookups over recorded issues

use super::core::Report;
use crate::issue::Issue;
use crate::path::PathQuery;
use tracing::trace;

impl Report {
    /// Whether any issue sits at `path`
    ///
    /// Paths are compared in their dotted form, so `"images.0"` matches an
    /// issue stored at `["images", 0]`. An omitted path matches issues
    /// recorded against the whole value.
    pub fn has_issue<'q>(&self, path: impl Into<PathQuery<'q>>) -> bool {
        if !self.has_issues() {
            return false;
        }

        let query = path.into();
        let key = query.joined();
        trace!(path = %key, "looking up issue by joined path");
        self.issues.iter().any(|issue| issue.path.joined() == key)
    }

    /// First issue at `path`, optionally restricted to one rule
    ///
    /// Paths are compared segment by segment: a dotted query only produces key
    /// segments, so it will not match an index segment stored as a number.
    pub fn find_issue<'q>(
        &self,
        path: impl Into<PathQuery<'q>>,
        rule: Option<&str>,
    ) -> Option<&Issue> {
        let target = path.into().to_path();
        trace!(path = %target, rule = ?rule, "finding issue");
        self.issues.iter().find(|issue| {
            issue.path == target && rule.map_or(true, |rule| issue.rule == rule)
        })
    }

    /// All issues at `path`, optionally restricted to one rule
    pub fn find_issues<'q>(
        &self,
        path: impl Into<PathQuery<'q>>,
        rule: Option<&str>,
    ) -> Vec<&Issue> {
        let target = path.into().to_path();
        self.issues
            .iter()
            .filter(|issue| issue.path == target && rule.map_or(true, |rule| issue.rule == rule))
            .collect()
    }

    /// First issue accepted by `predicate`
    pub fn find_issue_by<P>(&self, mut predicate: P) -> Option<&Issue>
    where
        P: FnMut(&Issue) -> bool,
    {
        self.issues.iter().find(|issue| predicate(issue))
    }
}

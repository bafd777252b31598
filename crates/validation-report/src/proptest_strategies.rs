//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! but valid paths, details and issues.

#![cfg(test)]

use crate::detail::IssueDetails;
use crate::issue::Issue;
use crate::path::{IssuePath, PathSegment};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use serde_json::Value;

/// Strategy for generating property names without separators
pub fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,12}"
}

/// Strategy for generating path segments
pub fn path_segment_strategy() -> impl Strategy<Value = PathSegment> {
    prop_oneof![
        key_strategy().prop_map(PathSegment::Key),
        (0usize..50).prop_map(PathSegment::Index),
    ]
}

/// Strategy for generating paths of key segments only
pub fn key_path_strategy() -> impl Strategy<Value = IssuePath> {
    vec(key_strategy(), 0..5).prop_map(IssuePath::new)
}

/// Strategy for generating mixed paths
pub fn issue_path_strategy() -> impl Strategy<Value = IssuePath> {
    vec(path_segment_strategy(), 0..5).prop_map(IssuePath::from)
}

/// Strategy for generating rule names
pub fn rule_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("type".to_string()),
        Just("uniq".to_string()),
        Just("required".to_string()),
        "[a-z]{1,10}",
    ]
}

/// Strategy for generating simple JSON leaf values
pub fn json_leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ]
}

/// Strategy for generating non-map detail payloads
///
/// `null` is left out: a null `details` reads back as no details at all.
pub fn payload_strategy() -> impl Strategy<Value = IssueDetails> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
        vec(json_leaf_strategy(), 0..4).prop_map(Value::Array),
    ]
    .prop_map(IssueDetails::payload)
}

/// Strategy for generating keyed issue details
pub fn fields_strategy() -> impl Strategy<Value = IssueDetails> {
    (
        option::of(json_leaf_strategy()),   // value
        option::of(json_leaf_strategy()),   // accept
        option::of("[a-z ]{1,30}"),         // reason
    ).prop_map(|(value, accept, reason)| {
        let mut details = IssueDetails::new();
        if let Some(value) = value {
            details.insert("value", value);
        }
        if let Some(accept) = accept {
            details.insert("accept", accept);
        }
        if let Some(reason) = reason {
            details.insert("reason", reason);
        }
        details
    })
}

/// Strategy for generating issue details of either shape
pub fn details_strategy() -> impl Strategy<Value = IssueDetails> {
    prop_oneof![4 => fields_strategy(), 1 => payload_strategy()]
}

/// Strategy for generating complete issues
pub fn issue_strategy() -> impl Strategy<Value = Issue> {
    (
        issue_path_strategy(),
        rule_strategy(),
        option::of(details_strategy()),
    ).prop_map(|(path, rule, details)| {
        let issue = Issue::new(path, rule);
        match details {
            Some(details) => issue.with_details(details),
            None => issue,
        }
    })
}

//! Issue path addressing
//!
//! An issue path locates the failing value inside the validated input as an
//! ordered list of object keys and array indexes. The empty path addresses the
//! whole value. Dotted strings (`"user.name"`) are accepted wherever a path is
//! expected and are split on `.` into key segments.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Separator used by the dotted path notation
pub const PATH_SEPARATOR: char = '.';

/// Single step of an issue path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Array position
    Index(usize),
    /// Object property name
    Key(String),
}

impl PathSegment {
    /// Returns the key name if this segment is a property
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(key) => Some(key),
            PathSegment::Index(_) => None,
        }
    }

    /// Returns the position if this segment is an array index
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(index) => Some(*index),
            PathSegment::Key(_) => None,
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(key) => Some(PathSegment::Key(key.clone())),
            Value::Number(number) => number
                .as_u64()
                .and_then(|index| usize::try_from(index).ok())
                .map(PathSegment::Index),
            _ => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{}", index),
            PathSegment::Key(key) => write!(f, "{}", key),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Location of an issue inside the validated value
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssuePath {
    segments: Vec<PathSegment>,
}

impl IssuePath {
    /// The empty path, addressing the whole value
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from explicit segments
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a dotted path into key segments
    ///
    /// The empty string yields the root path rather than a single empty key.
    /// Numeric-looking parts stay keys: `"images.0"` is `["images", "0"]`.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self::new(dotted.split(PATH_SEPARATOR))
    }

    /// Read a path out of a loosely typed issue record
    ///
    /// Accepts a dotted string or an array of strings and non-negative integers.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(dotted) => Ok(Self::parse(dotted)),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    PathSegment::from_json(item).ok_or_else(|| ReportError::invalid_path(item))
                })
                .collect::<Result<Vec<_>>>()
                .map(|segments| Self { segments }),
            other => Err(ReportError::invalid_path(other)),
        }
    }

    /// Segments in order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a segment in place
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// Copy of this path extended by one segment
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Whether `prefix` matches the leading segments of this path
    pub fn starts_with(&self, prefix: &IssuePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Segments joined with `.`
    pub fn joined(&self) -> String {
        join_segments(&self.segments)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }
}

fn join_segments(segments: &[PathSegment]) -> String {
    segments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

impl fmt::Display for IssuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl FromStr for IssuePath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for IssuePath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<String> for IssuePath {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<Vec<PathSegment>> for IssuePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl From<&[&str]> for IssuePath {
    fn from(keys: &[&str]) -> Self {
        Self::new(keys.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for IssuePath {
    fn from(keys: [&str; N]) -> Self {
        Self::new(keys)
    }
}

impl<const N: usize> From<[PathSegment; N]> for IssuePath {
    fn from(segments: [PathSegment; N]) -> Self {
        Self::new(segments)
    }
}

impl<'a> IntoIterator for &'a IssuePath {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Search key for path lookups on a report
///
/// `Root` stands for an omitted path and matches issues recorded against the
/// whole value, as does the empty dotted string.
#[derive(Debug, Clone, PartialEq)]
pub enum PathQuery<'a> {
    Root,
    Dotted(&'a str),
    Segments(Cow<'a, [PathSegment]>),
}

impl PathQuery<'_> {
    /// Segment form used for element-wise comparison
    pub fn to_path(&self) -> IssuePath {
        match self {
            PathQuery::Root => IssuePath::root(),
            PathQuery::Dotted(dotted) => IssuePath::parse(dotted),
            PathQuery::Segments(segments) => IssuePath::from(segments.to_vec()),
        }
    }

    /// Dotted form used for joined-string comparison
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            PathQuery::Root => Cow::Borrowed(""),
            PathQuery::Dotted(dotted) => Cow::Borrowed(dotted),
            PathQuery::Segments(segments) => Cow::Owned(join_segments(segments)),
        }
    }
}

impl<'a> From<&'a str> for PathQuery<'a> {
    fn from(dotted: &'a str) -> Self {
        PathQuery::Dotted(dotted)
    }
}

impl<'a> From<&'a String> for PathQuery<'a> {
    fn from(dotted: &'a String) -> Self {
        PathQuery::Dotted(dotted.as_str())
    }
}

impl<'a> From<&'a IssuePath> for PathQuery<'a> {
    fn from(path: &'a IssuePath) -> Self {
        PathQuery::Segments(Cow::Borrowed(path.segments()))
    }
}

impl From<IssuePath> for PathQuery<'_> {
    fn from(path: IssuePath) -> Self {
        PathQuery::Segments(Cow::Owned(path.segments))
    }
}

impl<'a> From<&'a [PathSegment]> for PathQuery<'a> {
    fn from(segments: &'a [PathSegment]) -> Self {
        PathQuery::Segments(Cow::Borrowed(segments))
    }
}

impl<'a> From<&'a [&'a str]> for PathQuery<'a> {
    fn from(keys: &'a [&'a str]) -> Self {
        PathQuery::Segments(Cow::Owned(keys.iter().map(|key| PathSegment::from(*key)).collect()))
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for PathQuery<'a> {
    fn from(keys: &'a [&'a str; N]) -> Self {
        PathQuery::from(&keys[..])
    }
}

impl<'a, T> From<Option<T>> for PathQuery<'a>
where
    T: Into<PathQuery<'a>>,
{
    fn from(query: Option<T>) -> Self {
        query.map_or(PathQuery::Root, Into::into)
    }
}

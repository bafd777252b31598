//! Issue details and the copy policy applied to them
//!
//! Details are an open-ended payload attached to an issue. The report never
//! interprets them; it only stores and returns them. By convention a validator
//! fills in `value` (the offending value), `accept` (what would have been
//! acceptable) and `reason` (free-form cause).
//!
//! Plain data is deep-copied whenever an issue is stored or snapshotted.
//! Values the report cannot meaningfully copy (custom error types, buffers,
//! domain value types) are wrapped in an [`OpaqueValue`]: they are cloned when
//! they offer [`OpaqueDetail::try_clone`] and shared by reference otherwise.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Conventional detail key for the offending value
pub const VALUE_KEY: &str = "value";
/// Conventional detail key for the acceptable value or shape
pub const ACCEPT_KEY: &str = "accept";
/// Conventional detail key for the failure cause
pub const REASON_KEY: &str = "reason";

/// Capability implemented by detail values the report cannot deep-copy
pub trait OpaqueDetail: fmt::Debug + Send + Sync + 'static {
    /// Produce an independent copy, or `None` to be shared by reference
    fn try_clone(&self) -> Option<Box<dyn OpaqueDetail>> {
        None
    }

    /// Structural form used when the issue is serialized
    fn to_json(&self) -> Value;

    fn as_any(&self) -> &dyn Any;
}

/// Handle to an opaque detail value
pub struct OpaqueValue {
    inner: Arc<dyn OpaqueDetail>,
}

impl OpaqueValue {
    pub fn new<T: OpaqueDetail>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Whether both handles point at the same underlying value
    pub fn shares_with(&self, other: &OpaqueValue) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.inner) as *const (),
            Arc::as_ptr(&other.inner) as *const (),
        )
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    pub fn to_json(&self) -> Value {
        self.inner.to_json()
    }
}

impl Clone for OpaqueValue {
    fn clone(&self) -> Self {
        match self.inner.try_clone() {
            Some(copy) => Self {
                inner: Arc::from(copy),
            },
            None => Self {
                inner: Arc::clone(&self.inner),
            },
        }
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueValue").field(&self.inner).finish()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.shares_with(other) || self.to_json() == other.to_json()
    }
}

/// A single detail entry
#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    /// JSON-like data, deep-copied with the issue
    Plain(Value),
    /// Value handled through the [`OpaqueDetail`] capability
    Opaque(OpaqueValue),
}

impl DetailValue {
    pub fn as_plain(&self) -> Option<&Value> {
        match self {
            DetailValue::Plain(value) => Some(value),
            DetailValue::Opaque(_) => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&OpaqueValue> {
        match self {
            DetailValue::Opaque(value) => Some(value),
            DetailValue::Plain(_) => None,
        }
    }

    /// JSON rendering, asking opaque values for their structural form
    pub fn to_json(&self) -> Value {
        match self {
            DetailValue::Plain(value) => value.clone(),
            DetailValue::Opaque(value) => value.to_json(),
        }
    }
}

impl Serialize for DetailValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DetailValue::Plain(value) => value.serialize(serializer),
            DetailValue::Opaque(value) => value.to_json().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for DetailValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(DetailValue::Plain)
    }
}

impl From<Value> for DetailValue {
    fn from(value: Value) -> Self {
        DetailValue::Plain(value)
    }
}

impl From<OpaqueValue> for DetailValue {
    fn from(value: OpaqueValue) -> Self {
        DetailValue::Opaque(value)
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        DetailValue::Plain(Value::from(value))
    }
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        DetailValue::Plain(Value::from(value))
    }
}

impl From<bool> for DetailValue {
    fn from(value: bool) -> Self {
        DetailValue::Plain(Value::from(value))
    }
}

impl From<i64> for DetailValue {
    fn from(value: i64) -> Self {
        DetailValue::Plain(Value::from(value))
    }
}

impl From<f64> for DetailValue {
    fn from(value: f64) -> Self {
        DetailValue::Plain(Value::from(value))
    }
}

/// Payload attached to an issue
///
/// Usually a map of keyed fields, but any other value handed in by a validator
/// (a message string, a list of candidates) is kept as a single payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssueDetails {
    Fields(BTreeMap<String, DetailValue>),
    Payload(DetailValue),
}

impl Default for IssueDetails {
    fn default() -> Self {
        IssueDetails::Fields(BTreeMap::new())
    }
}

impl IssueDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Details made of a single non-map value
    pub fn payload(value: impl Into<DetailValue>) -> Self {
        IssueDetails::Payload(value.into())
    }

    /// Read details out of a JSON record
    ///
    /// `null` means no details. Objects become keyed fields; any other value is
    /// stored as a payload.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Object(map) => Some(IssueDetails::Fields(
                map.iter()
                    .map(|(key, value)| (key.clone(), DetailValue::Plain(value.clone())))
                    .collect(),
            )),
            other => Some(IssueDetails::Payload(DetailValue::Plain(other.clone()))),
        }
    }

    pub fn as_fields(&self) -> Option<&BTreeMap<String, DetailValue>> {
        match self {
            IssueDetails::Fields(fields) => Some(fields),
            IssueDetails::Payload(_) => None,
        }
    }

    pub fn as_payload(&self) -> Option<&DetailValue> {
        match self {
            IssueDetails::Payload(value) => Some(value),
            IssueDetails::Fields(_) => None,
        }
    }

    /// Set a keyed field
    ///
    /// Inserting into a payload replaces the payload with a map.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<DetailValue>,
    ) -> Option<DetailValue> {
        if let IssueDetails::Payload(_) = self {
            *self = IssueDetails::default();
        }
        match self {
            IssueDetails::Fields(fields) => fields.insert(key.into(), value.into()),
            IssueDetails::Payload(_) => None,
        }
    }

    /// Builder form of [`IssueDetails::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DetailValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_value(self, value: impl Into<DetailValue>) -> Self {
        self.with(VALUE_KEY, value)
    }

    pub fn with_accept(self, accept: impl Into<DetailValue>) -> Self {
        self.with(ACCEPT_KEY, accept)
    }

    pub fn with_reason(self, reason: impl Into<DetailValue>) -> Self {
        self.with(REASON_KEY, reason)
    }

    pub fn get(&self, key: &str) -> Option<&DetailValue> {
        self.as_fields().and_then(|fields| fields.get(key))
    }

    /// The offending value, if recorded
    pub fn value(&self) -> Option<&DetailValue> {
        self.get(VALUE_KEY)
    }

    /// The acceptable value or shape, if recorded
    pub fn accept(&self) -> Option<&DetailValue> {
        self.get(ACCEPT_KEY)
    }

    /// The failure cause, if recorded
    pub fn reason(&self) -> Option<&DetailValue> {
        self.get(REASON_KEY)
    }

    /// Number of keyed fields; a payload counts as one
    pub fn len(&self) -> usize {
        match self {
            IssueDetails::Fields(fields) => fields.len(),
            IssueDetails::Payload(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keyed fields in order; empty for a payload
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetailValue)> {
        self.as_fields()
            .into_iter()
            .flatten()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn to_json(&self) -> Value {
        match self {
            IssueDetails::Fields(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            IssueDetails::Payload(value) => value.to_json(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for IssueDetails
where
    K: Into<String>,
    V: Into<DetailValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        IssueDetails::Fields(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

//! Heterogeneous payloads returned by feature actions.
//!
//! A feature page may hand back plain text, a mapping, a list, or nested
//! combinations. External data is converted into [`Payload`] once at the
//! boundary, and everything downstream pattern-matches on the variant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tagged shape of a value entering the FAQ pipeline.
///
/// Mappings enumerate in key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Payload {
    /// Plain text.
    Text(String),

    /// Integer value.
    Integer(i64),

    /// Floating point value.
    Float(f64),

    /// Boolean value.
    Boolean(bool),

    /// Ordered sequence of values.
    List(Vec<Self>),

    /// Mapping with unique keys.
    Map(BTreeMap<String, Self>),

    /// Absent value.
    Null,
}

impl Payload {
    /// Returns `true` for values that carry nothing: null, empty text,
    /// empty collections, zero, and `false`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
            Self::Integer(n) => *n == 0,
            Self::Float(f) => *f == 0.0,
            Self::Boolean(b) => !b,
        }
    }

    /// Converts back into a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Integer(n) => Value::from(*n),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Boolean(b) => Value::Bool(*b),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Null => Value::Null,
        }
    }
}

/// String form of a value: text verbatim, scalars in their natural
/// rendering, collections as compact JSON.
impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::List(_) | Self::Map(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(0.0)), Self::Integer),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Payload {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Payload {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

#[allow(clippy::use_self)]
impl<T: Into<Payload>> From<Vec<T>> for Payload {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

#[allow(clippy::use_self)]
impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

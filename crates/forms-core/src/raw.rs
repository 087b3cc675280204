//! Raw answer values as submitted by a caller, before encoding.
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// Candidate answers keyed by question id. A missing key means "not answered".
pub type RawAnswers = HashMap<String, RawValue>;

/// A loosely typed answer value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<RawValue>),
    Object(Map<String, Value>),
}

impl RawValue {
    /// Strings, numbers and booleans
    pub fn is_primitive(&self) -> bool {
        matches!(self, RawValue::Bool(_) | RawValue::Number(_) | RawValue::String(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// JSON form of the value. Dates become ISO-8601 strings, NaN becomes null.
    pub fn to_json(&self) -> Value {
        match self {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(*b),
            RawValue::Number(n) => Number::from_f64(*n).map(Value::Number).unwrap_or(Value::Null),
            RawValue::String(s) => Value::String(s.clone()),
            RawValue::Date(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            RawValue::Array(items) => Value::Array(items.iter().map(RawValue::to_json).collect()),
            RawValue::Object(map) => Value::Object(map.clone()),
        }
    }

    /// Number coercion following the browser rules the forms were built on:
    /// blank strings are 0, unparseable strings are NaN, single-element
    /// arrays coerce their element.
    pub fn coerce_number(&self) -> f64 {
        match self {
            RawValue::Null => 0.0,
            RawValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            RawValue::Number(n) => *n,
            RawValue::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            RawValue::Date(dt) => dt.timestamp_millis() as f64,
            RawValue::Array(items) => match items.as_slice() {
                [] => 0.0,
                [single] => single.coerce_number(),
                _ => f64::NAN,
            },
            RawValue::Object(_) => f64::NAN,
        }
    }
}

/// Format a number the way it is displayed to form authors: integers
/// without a fractional part, `NaN` and `Infinity` spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => RawValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => RawValue::String(s),
            Value::Array(items) => RawValue::Array(items.into_iter().map(RawValue::from).collect()),
            Value::Object(map) => RawValue::Object(map),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(dt: DateTime<Utc>) -> Self {
        RawValue::Date(dt)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        RawValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawValue::from)
    }
}

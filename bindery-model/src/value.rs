//! In-memory field values.
//!
//! External trees are `serde_json::Value`s owned by the caller. Everything the
//! engine stores on a bound object goes through [`FieldValue`] instead, which
//! differs from JSON in three ways: it can be `Absent` (never set), a
//! [`Number`] can hold the NaN of a lenient coercion, and it can carry a
//! nested bound object.

use crate::{Bound, Number};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The value of a bound field.
#[derive(Debug, Default)]
pub enum FieldValue {
    /// Not present at all (distinct from an explicit `null`).
    #[default]
    Absent,
    Null,
    Text(String),
    Number(Number),
    Boolean(bool),
    List(Vec<FieldValue>),
    Object(BTreeMap<String, FieldValue>),
    /// A nested object carrying its own schema.
    Bound(Box<dyn Bound>),
}

impl FieldValue {
    /// Converts an external JSON value into an owned in-memory value.
    ///
    /// The result shares nothing with `value`, so later mutation of either
    /// side is invisible to the other.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(*b),
            Value::Number(n) => Self::Number(Number::from_json(n)),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Converts back into JSON, delegating nested bound objects to `bound`.
    ///
    /// Returns `None` for `Absent`. Inside containers an absent value becomes
    /// `null`, and non-finite numbers become `null` because JSON cannot carry
    /// them.
    pub fn to_json_with(&self, bound: &dyn Fn(&dyn Bound) -> Value) -> Option<Value> {
        let json = match self {
            Self::Absent => return None,
            Self::Null => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => n.to_json(),
            Self::Boolean(b) => Value::Bool(*b),
            Self::List(items) => Value::Array(
                items
                    .iter()
                    .map(|item| item.to_json_with(bound).unwrap_or(Value::Null))
                    .collect(),
            ),
            Self::Object(map) => Value::Object(
                map.iter()
                    .filter_map(|(k, v)| v.to_json_with(bound).map(|v| (k.clone(), v)))
                    .collect::<Map<String, Value>>(),
            ),
            Self::Bound(b) => bound(b.as_ref()),
        };
        Some(json)
    }

    /// True for `Absent` and `Null`.
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Absent | Self::Null)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_bound(&self) -> Option<&dyn Bound> {
        match self {
            Self::Bound(b) => Some(b.as_ref()),
            _ => None,
        }
    }
}

impl Clone for FieldValue {
    fn clone(&self) -> Self {
        match self {
            Self::Absent => Self::Absent,
            Self::Null => Self::Null,
            Self::Text(s) => Self::Text(s.clone()),
            Self::Number(n) => Self::Number(*n),
            Self::Boolean(b) => Self::Boolean(*b),
            Self::List(items) => Self::List(items.clone()),
            Self::Object(map) => Self::Object(map.clone()),
            Self::Bound(b) => Self::Bound(b.clone_box()),
        }
    }
}

/// Structural equality. Nested bound objects never compare equal, the same
/// way NaN never equals itself.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) | (Self::Null, Self::Null) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Number> for FieldValue {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(Number::Float(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::Int(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Number(Number::UInt(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

//! The five scalar kinds and their shape checks and coercions.

use crate::{FieldValue, Number};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One of the universal JSON-compatible kinds a field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Text,
    Number,
    Boolean,
    List,
    Object,
}

impl ScalarKind {
    /// True when an external value already has this kind's shape.
    pub fn matches_json(self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::List => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    /// True when an in-memory value has this kind's shape.
    ///
    /// Numbers must be finite: NaN and infinities have no JSON form.
    pub fn matches_field(self, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::Text, FieldValue::Text(_)) => true,
            (Self::Number, FieldValue::Number(n)) => n.is_finite(),
            (Self::Boolean, FieldValue::Boolean(_)) => true,
            (Self::List, FieldValue::List(_)) => true,
            (Self::Object, FieldValue::Object(_)) => true,
            _ => false,
        }
    }

    /// Forces `value` into this kind, however degenerate the result.
    ///
    /// Callers handle `null` themselves; it is coerced like any other value
    /// here. Text and number conversions follow the usual JSON-host rules:
    /// non-numeric text becomes NaN, containers become `true`, a lone value
    /// is wrapped into a one-element list. A value that already has this
    /// kind's shape is copied unchanged, so integers stay exact.
    pub fn coerce(self, value: &Value) -> FieldValue {
        if self.matches_json(value) {
            return FieldValue::from_json(value);
        }
        match self {
            Self::Text => FieldValue::Text(to_text(value)),
            Self::Number => FieldValue::from(to_number(value)),
            Self::Boolean => FieldValue::Boolean(to_boolean(value)),
            Self::List => match value {
                Value::Array(_) => FieldValue::from_json(value),
                other => FieldValue::List(vec![FieldValue::from_json(other)]),
            },
            Self::Object => match value {
                Value::Object(_) => FieldValue::from_json(value),
                Value::Array(items) => FieldValue::Object(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| (i.to_string(), FieldValue::from_json(item)))
                        .collect(),
                ),
                _ => FieldValue::Object(Default::default()),
            },
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

fn to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => Number::from_json(n).to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        // A container goes through its text form, so `[]` is 0 and `[7]` is 7.
        Value::Array(_) | Value::Object(_) => parse_number(&to_text(value)),
    }
}

fn parse_number(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = t.strip_prefix(prefix) {
            // from_str_radix takes a leading sign, a prefixed literal does not.
            if digits.starts_with(['+', '-']) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |v| v as f64);
        }
    }
    // Rust also accepts "inf" and "nan" spellings, which are not numbers here.
    let decimal = t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if decimal {
        t.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

//! Numbers held by bound fields.

use serde_json::Value;
use std::fmt;

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A number as decoded from JSON, or as produced by a coercion.
///
/// JSON integers keep their exact value in `Int` or `UInt`, so identifiers
/// beyond 2^53 survive a decode/encode round trip. `Float` holds fractional
/// numbers and the results of lenient coercion, which may be NaN.
///
/// Two integers compare exactly; anything involving a float compares as
/// `f64`, so `Float(12.0) == Int(12)` and NaN never equals itself.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    pub fn from_json(n: &serde_json::Number) -> Self {
        if let Some(u) = n.as_u64() {
            Self::UInt(u)
        } else if let Some(i) = n.as_i64() {
            Self::Int(i)
        } else {
            Self::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    /// Renders the number the way a JSON producer would. Integers are exact,
    /// integral floats within the safe range become JSON integers and
    /// non-finite floats become `null`.
    pub fn to_json(self) -> Value {
        match self {
            Self::Int(i) => Value::from(i),
            Self::UInt(u) => Value::from(u),
            Self::Float(f) => json_float(f),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::UInt(u) => u as f64,
            Self::Float(f) => f,
        }
    }

    /// The exact `i64` value, `None` for fractions, NaN and out-of-range
    /// values.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(i),
            Self::UInt(u) => i64::try_from(u).ok(),
            Self::Float(f) => {
                (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
            }
        }
    }

    /// The exact `u64` value, `None` for negatives, fractions and NaN.
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Self::Int(i) => u64::try_from(i).ok(),
            Self::UInt(u) => Some(u),
            Self::Float(f) => (f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64).then_some(f as u64),
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Self::Int(_) | Self::UInt(_) => true,
            Self::Float(f) => f.is_finite(),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(i), Self::UInt(u)) | (Self::UInt(u), Self::Int(i)) => {
                u64::try_from(i).is_ok_and(|i| i == u)
            }
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

/// Integers print every digit. Floats print in shortest form without an
/// integral fraction, switching to exponent notation below 1e-6 and from
/// 1e21 up (`1e-7`, `1e+21`).
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => f.write_str(&float_text(x)),
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

fn json_float(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

fn float_text(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&x.abs()) {
        return x.to_string();
    }
    let text = format!("{x:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
        _ => text,
    }
}

//! Conversions between typed Rust fields and [`FieldValue`].

use crate::{Bound, FieldValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// A Rust type that can back a bound field.
pub trait Field: Sized {
    fn to_field(&self) -> FieldValue;

    /// Converts a decoded value into the Rust type, `None` when the shape
    /// does not fit.
    fn from_field(value: FieldValue) -> Option<Self>;
}

impl Field for FieldValue {
    fn to_field(&self) -> FieldValue {
        self.clone()
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        Some(value)
    }
}

impl Field for String {
    fn to_field(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Field for f64 {
    fn to_field(&self) -> FieldValue {
        FieldValue::from(*self)
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        value.as_f64()
    }
}

/// Only integral, in-range numbers convert; NaN from a lenient decode is
/// rejected.
impl Field for i64 {
    fn to_field(&self) -> FieldValue {
        FieldValue::from(*self)
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        value.as_number()?.as_i64()
    }
}

impl Field for u64 {
    fn to_field(&self) -> FieldValue {
        FieldValue::from(*self)
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        value.as_number()?.as_u64()
    }
}

impl Field for bool {
    fn to_field(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        value.as_bool()
    }
}

impl<T: Field> Field for Vec<T> {
    fn to_field(&self) -> FieldValue {
        FieldValue::List(self.iter().map(Field::to_field).collect())
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::List(items) => items.into_iter().map(T::from_field).collect(),
            _ => None,
        }
    }
}

impl<T: Field> Field for BTreeMap<String, T> {
    fn to_field(&self) -> FieldValue {
        FieldValue::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_field()))
                .collect(),
        )
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Object(map) => map
                .into_iter()
                .map(|(k, v)| T::from_field(v).map(|v| (k, v)))
                .collect(),
            _ => None,
        }
    }
}

impl<T: Field> Field for HashMap<String, T> {
    fn to_field(&self) -> FieldValue {
        FieldValue::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_field()))
                .collect(),
        )
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Object(map) => map
                .into_iter()
                .map(|(k, v)| T::from_field(v).map(|v| (k, v)))
                .collect(),
            _ => None,
        }
    }
}

/// `None` is `Absent` in memory, so an optional field with no declared
/// value falls back to the type's default on first decode.
impl<T: Field> Field for Option<T> {
    fn to_field(&self) -> FieldValue {
        match self {
            Some(v) => v.to_field(),
            None => FieldValue::Absent,
        }
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Absent | FieldValue::Null => Some(None),
            other => T::from_field(other).map(Some),
        }
    }
}

impl Field for Value {
    fn to_field(&self) -> FieldValue {
        FieldValue::from_json(self)
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        value.to_json_with(&|_| Value::Null)
    }
}

impl Field for Box<dyn Bound> {
    fn to_field(&self) -> FieldValue {
        FieldValue::Bound(self.clone_box())
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bound(b) => Some(b),
            _ => None,
        }
    }
}

/// Carries any serde type through a field as its JSON form, typically bound
/// with an `Object` or `List` scalar kind.
///
/// A value that fails to serialize is `Absent`; JSON that does not
/// deserialize into `T` is rejected like any other shape mismatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize + DeserializeOwned> Field for Json<T> {
    fn to_field(&self) -> FieldValue {
        serde_json::to_value(&self.0)
            .map(|v| FieldValue::from_json(&v))
            .unwrap_or_default()
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        let json = value.to_json_with(&|_| Value::Null)?;
        serde_json::from_value(json).ok().map(Json)
    }
}

//! Bound object -> external tree.

use bindery_model::{Bound, FieldValue, TypeDescriptor, default_for};
use serde_json::{Map, Value};

/// Renders every non-ignored schema field of `source` into a new tree.
///
/// Values that do not fit their declared type are replaced by the field's
/// default. Encode never fails and leaves `source` untouched.
pub fn encode(source: &dyn Bound) -> Value {
    let schema = source.schema();
    let mut tree = Value::Object(Map::new());

    for (name, entry) in schema
        .entries()
        .filter(|(_, entry)| !entry.is_ignored_on_encode())
    {
        let value = source.field(name);
        if let Some(json) = encode_value(&value, entry.descriptor(), &entry.encode_fallback()) {
            entry.path().write(&mut tree, json);
        }
    }
    tree
}

/// Encodes one value against `descriptor`. `None` means the value is left
/// out of the output.
pub fn encode_value(
    value: &FieldValue,
    descriptor: &TypeDescriptor,
    fallback: &FieldValue,
) -> Option<Value> {
    match descriptor {
        TypeDescriptor::Scalar(kind) if kind.matches_field(value) => to_json(value),
        TypeDescriptor::Scalar(_) => to_json(fallback),

        TypeDescriptor::ListOf(item) => match value {
            FieldValue::List(items) => {
                let item_fallback = default_for(item);
                Some(Value::Array(
                    items
                        .iter()
                        .map(|v| encode_value(v, item, &item_fallback).unwrap_or(Value::Null))
                        .collect(),
                ))
            }
            _ => to_json(fallback),
        },

        // The key set is whatever is in memory now, not what was decoded.
        TypeDescriptor::MapOf(item) => {
            let item_fallback = default_for(item);
            let map = match value {
                FieldValue::Object(map) => map
                    .iter()
                    .filter_map(|(k, v)| encode_value(v, item, &item_fallback).map(|v| (k.clone(), v)))
                    .collect(),
                _ => Map::new(),
            };
            Some(Value::Object(map))
        }

        // A nested field with no object is left out. Its fallback is never
        // used: a captured default is another instance's object.
        TypeDescriptor::Nested(_) => match value {
            FieldValue::Bound(nested) => Some(encode(nested.as_ref())),
            _ => None,
        },
    }
}

/// Plain conversion; bound objects found inside data are encoded with their
/// own schema.
pub(crate) fn to_json(value: &FieldValue) -> Option<Value> {
    value.to_json_with(&encode)
}

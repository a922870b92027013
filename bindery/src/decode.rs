//! External tree -> bound object.
//!
//! Decoding never fails on malformed input: every shape mismatch resolves to
//! the field's default and decoding carries on with the remaining fields.
//! The only errors are structural ones raised while constructing nested
//! bound objects.

use bindery_model::{Bound, FieldValue, Result, TypeDescriptor, default_for};
use serde_json::Value;
use tracing::{debug, trace, warn};

/// How scalar fields treat values of the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Only exact shape matches are accepted; anything else becomes the
    /// field's default.
    #[default]
    Strict,
    /// Present values of the wrong shape are force-coerced to the declared
    /// kind, even when the result is degenerate (NaN, `true` for any object).
    Lenient,
}

/// Populates every schema field of `target` from `tree`, in declaration
/// order.
pub fn decode(target: &mut dyn Bound, tree: &Value, mode: Mode) -> Result<()> {
    let schema = target.schema();
    let capture = schema.default_capture();

    for (name, entry) in schema.entries() {
        let raw = entry.path().read(tree);
        let fallback = entry.decode_fallback(capture, || target.field(name));
        trace!(
            type_name = schema.type_name(),
            field = name,
            path = %entry.path(),
            present = raw.is_some(),
            "decoding field"
        );

        let value = decode_value(raw, entry.descriptor(), fallback, mode)?;
        if !target.set_field(name, value) {
            warn!(
                type_name = schema.type_name(),
                field = name,
                descriptor = %entry.descriptor(),
                "decoded value does not fit the field, keeping current value"
            );
        }
    }
    Ok(())
}

/// Decodes one value against `descriptor`.
///
/// `raw` is `None` when the path was missing from the tree. `fallback` is
/// returned verbatim for any mismatch; list and map mismatches are atomic,
/// never partially decoded.
pub fn decode_value(
    raw: Option<&Value>,
    descriptor: &TypeDescriptor,
    fallback: FieldValue,
    mode: Mode,
) -> Result<FieldValue> {
    let value = match descriptor {
        // Nested objects always come from their own construction, even for
        // absent input; the fallback is never used.
        TypeDescriptor::Nested(nested) => {
            FieldValue::Bound(nested.construct(raw.unwrap_or(&Value::Null))?)
        }

        TypeDescriptor::ListOf(item) => match raw {
            Some(Value::Array(items)) => FieldValue::List(
                items
                    .iter()
                    .map(|v| decode_value(Some(v), item, default_for(item), mode))
                    .collect::<Result<_>>()?,
            ),
            _ => defaulted(descriptor, fallback),
        },

        TypeDescriptor::MapOf(item) => match raw {
            Some(Value::Object(map)) => FieldValue::Object(
                map.iter()
                    .map(|(k, v)| {
                        decode_value(Some(v), item, default_for(item), mode).map(|v| (k.clone(), v))
                    })
                    .collect::<Result<_>>()?,
            ),
            _ => defaulted(descriptor, fallback),
        },

        TypeDescriptor::Scalar(kind) => match (raw, mode) {
            (Some(v), Mode::Strict) if kind.matches_json(v) => FieldValue::from_json(v),
            (Some(v), Mode::Lenient) if !v.is_null() => kind.coerce(v),
            _ => defaulted(descriptor, fallback),
        },
    };
    Ok(value)
}

fn defaulted(descriptor: &TypeDescriptor, fallback: FieldValue) -> FieldValue {
    debug!(descriptor = %descriptor, "value missing or mismatched, using default");
    fallback
}

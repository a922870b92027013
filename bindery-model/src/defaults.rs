use crate::{FieldValue, ScalarKind, TypeDescriptor};

/// The canonical zero value of a descriptor.
///
/// Nested types have no default of their own (`Absent`); their fields get
/// defaults from the nested type's construction instead.
pub fn default_for(descriptor: &TypeDescriptor) -> FieldValue {
    match descriptor {
        TypeDescriptor::Scalar(ScalarKind::Text) => FieldValue::Text(String::new()),
        TypeDescriptor::Scalar(ScalarKind::Number) => FieldValue::from(0.0),
        TypeDescriptor::Scalar(ScalarKind::Boolean) => FieldValue::Boolean(false),
        TypeDescriptor::Scalar(ScalarKind::List) | TypeDescriptor::ListOf(_) => {
            FieldValue::List(Vec::new())
        }
        TypeDescriptor::Scalar(ScalarKind::Object) | TypeDescriptor::MapOf(_) => {
            FieldValue::Object(Default::default())
        }
        TypeDescriptor::Nested(_) => FieldValue::Absent,
    }
}

use crate::{FieldValue, Result, Schema};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An object whose fields are populated from, and rendered to, JSON trees
/// according to a shared [`Schema`].
///
/// The object never owns its schema. [`Bound::schema`] looks it up by type
/// identity (normally in [`SchemaRegistry::global`](crate::SchemaRegistry::global)),
/// so every instance and every clone of a type sees the same schema.
///
/// Most types implement this through the `bound!` macro of the `bindery`
/// crate; hand-written impls are needed for enums that delegate to a variant.
pub trait Bound: Any + fmt::Debug + Send + Sync {
    /// Name of the bound type, used in logs and error messages.
    fn type_name(&self) -> &'static str;

    /// The schema this object is bound with. An object whose type was never
    /// attached gets an empty schema.
    fn schema(&self) -> Arc<Schema>;

    /// Current value of the named field, `Absent` for unknown names.
    fn field(&self, name: &str) -> FieldValue;

    /// Assigns the named field.
    ///
    /// Returns `false` and leaves the field untouched when `value` cannot be
    /// represented by the field's Rust type, or the name is unknown.
    fn set_field(&mut self, name: &str, value: FieldValue) -> bool;

    fn clone_box(&self) -> Box<dyn Bound>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// A bound type that can be constructed directly from an external tree.
///
/// This is the construction path used for nested-type fields: the engine
/// hands over the raw value found at the field's path (`null` when absent)
/// and the type is responsible for its own defaults.
pub trait BoundType: Bound + Sized {
    fn from_tree(raw: &Value) -> Result<Self>;
}

impl Clone for Box<dyn Bound> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

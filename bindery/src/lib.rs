//! Declarative, bidirectional binding between typed objects and JSON trees.
//!
//! A bound type declares once, in a [`Schema`], where each field lives in an
//! external tree and what it holds. The engine then decodes trees into
//! instances and encodes instances back into trees:
//!
//! - [`decode()`] / [`BoundExt::decode`]: type-directed, never fails on bad input
//! - [`encode()`] / [`BoundExt::encode`]: honours ignore-on-encode
//! - [`clone_bound`]: deep copies that keep sharing the type's schema
//!
//! ```ignore
//! #[derive(Debug, Clone)]
//! struct Student {
//!     full_name: String,
//!     age: f64,
//! }
//!
//! bindery::bound!(Student { full_name, age });
//!
//! impl Student {
//!     fn new() -> bindery::Result<Self> {
//!         SchemaRegistry::global().attach_with::<Self>(|| {
//!             Schema::builder("Student")
//!                 .field("full_name", BindingEntry::text("profile.full_name"))
//!                 .field("age", BindingEntry::number("profile.age"))
//!                 .build()
//!         })?;
//!         Ok(Self { full_name: "noname".into(), age: -1.0 })
//!     }
//! }
//!
//! let mut s = Student::new()?;
//! s.decode(&json!({"profile": {"full_name": "John Smith", "age": 12}}))?;
//! assert_eq!(s.encode()["profile"]["age"], 12);
//! ```

mod clone;
mod decode;
mod encode;

pub use bindery_model::{
    BindingEntry, Bound, BoundType, DefaultCapture, Error, Field, FieldPath, FieldValue, Json,
    NestedFactory, NestedType, Result, ScalarKind, Schema, SchemaBuilder, SchemaRegistry, Segment,
    TypeDescriptor, default_for, list_of, map_of, nested,
};
pub use clone::{clone_bound, shares_schema};
pub use decode::{Mode, decode, decode_value};
pub use encode::{encode, encode_value};

use serde_json::Value;

/// Decode and encode as methods on any sized bound type.
pub trait BoundExt: Bound + Sized {
    /// Strict decode; mutates `self` in place and returns it for chaining.
    fn decode(&mut self, tree: &Value) -> Result<&mut Self> {
        self.decode_with(tree, Mode::Strict)
    }

    fn decode_with(&mut self, tree: &Value, mode: Mode) -> Result<&mut Self> {
        decode::decode(self, tree, mode)?;
        Ok(self)
    }

    fn encode(&self) -> Value {
        encode::encode(self)
    }
}

impl<T: Bound> BoundExt for T {}

/// Implements [`Bound`] and [`Field`] for a `Clone` struct from the names of
/// its bound fields.
///
/// The type's schema is looked up in [`SchemaRegistry::global`] by the
/// type's identity; the name is only reported in logs. Every listed field
/// must implement [`Field`].
///
/// ```ignore
/// bindery::bound!(ClassRoom { monitor, students, map_students });
/// ```
#[macro_export]
macro_rules! bound {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::Bound for $ty {
            fn type_name(&self) -> &'static str {
                stringify!($ty)
            }

            fn schema(&self) -> ::std::sync::Arc<$crate::Schema> {
                $crate::SchemaRegistry::global().lookup::<Self>()
            }

            fn field(&self, name: &str) -> $crate::FieldValue {
                match name {
                    $(stringify!($field) => $crate::Field::to_field(&self.$field),)+
                    _ => $crate::FieldValue::Absent,
                }
            }

            fn set_field(&mut self, name: &str, value: $crate::FieldValue) -> bool {
                match name {
                    $(stringify!($field) => match $crate::Field::from_field(value) {
                        Some(v) => {
                            self.$field = v;
                            true
                        }
                        None => false,
                    },)+
                    _ => false,
                }
            }

            fn clone_box(&self) -> ::std::boxed::Box<dyn $crate::Bound> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }

        impl $crate::Field for $ty {
            fn to_field(&self) -> $crate::FieldValue {
                $crate::FieldValue::Bound(::std::boxed::Box::new(::std::clone::Clone::clone(self)))
            }

            fn from_field(value: $crate::FieldValue) -> ::std::option::Option<Self> {
                match value {
                    $crate::FieldValue::Bound(b) => b.into_any().downcast::<$ty>().ok().map(|b| *b),
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}

//! Core binding model for bindery.
//!
//! Defines the data structures the binding engine interprets:
//! - [`FieldValue`]: the in-memory value of a bound field
//! - [`Number`]: exact integers or floats, as decoded
//! - [`Bound`] / [`BoundType`]: the contract a schema-bound object implements
//! - [`Field`]: conversions between typed Rust fields and [`FieldValue`]
//! - [`FieldPath`]: dotted/indexed locations inside an external JSON tree
//! - [`TypeDescriptor`]: the closed set of field types (scalars, list-of, map-of, nested)
//! - [`Schema`] / [`BindingEntry`]: per-type field bindings with memoized defaults
//! - [`SchemaRegistry`]: shared schemas keyed by bound-type identity
//!
//! The decode/encode algorithms live in the `bindery` crate; this crate holds
//! everything they dispatch on.

mod bound;
mod defaults;
mod descriptor;
mod field;
mod kind;
mod number;
mod path;
mod registry;
mod schema;
mod value;

pub use bound::{Bound, BoundType};
pub use defaults::default_for;
pub use descriptor::{NestedFactory, NestedType, TypeDescriptor, list_of, map_of, nested};
pub use field::{Field, Json};
pub use kind::ScalarKind;
pub use number::Number;
pub use path::{FieldPath, Segment};
pub use registry::SchemaRegistry;
pub use schema::{BindingEntry, DefaultCapture, Schema, SchemaBuilder};
pub use value::FieldValue;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing bound objects.
///
/// Shape mismatches during decode are never errors; only structural problems
/// with schemas (or a host constructor that refuses to build) surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("cannot construct {type_name}: {reason}")]
    Construction { type_name: String, reason: String },
}

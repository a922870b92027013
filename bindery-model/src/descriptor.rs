//! Type descriptors: the closed set of shapes a bound field can declare.

use crate::registry::short_type_name;
use crate::{Bound, BoundType, Result, ScalarKind};
use serde_json::Value;
use std::fmt;

/// Builds a nested bound object from the raw value at its field's path.
pub type NestedFactory = fn(&Value) -> Result<Box<dyn Bound>>;

/// A reference to another bound type, resolved when the schema is written.
#[derive(Clone, Copy)]
pub struct NestedType {
    type_name: &'static str,
    factory: NestedFactory,
}

impl NestedType {
    /// Nested values of `T`, built through [`BoundType::from_tree`].
    #[must_use]
    pub fn of<T: BoundType>() -> Self {
        Self {
            type_name: short_type_name::<T>(),
            factory: construct::<T>,
        }
    }

    /// Nested values built by an explicit factory, e.g. one that inspects a
    /// discriminator and returns the matching variant of a closed enum.
    #[must_use]
    pub fn with_factory(type_name: &'static str, factory: NestedFactory) -> Self {
        Self { type_name, factory }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn construct(&self, raw: &Value) -> Result<Box<dyn Bound>> {
        (self.factory)(raw)
    }
}

fn construct<T: BoundType>(raw: &Value) -> Result<Box<dyn Bound>> {
    Ok(Box::new(T::from_tree(raw)?))
}

impl fmt::Debug for NestedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NestedType").field(&self.type_name).finish()
    }
}

impl PartialEq for NestedType {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

/// What a field holds. List-of and map-of wrap any descriptor, including
/// each other and nested types.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Scalar(ScalarKind),
    ListOf(Box<TypeDescriptor>),
    /// String-keyed container with homogeneous values.
    MapOf(Box<TypeDescriptor>),
    Nested(NestedType),
}

impl TypeDescriptor {
    pub const TEXT: Self = Self::Scalar(ScalarKind::Text);
    pub const NUMBER: Self = Self::Scalar(ScalarKind::Number);
    pub const BOOLEAN: Self = Self::Scalar(ScalarKind::Boolean);
    pub const LIST: Self = Self::Scalar(ScalarKind::List);
    pub const OBJECT: Self = Self::Scalar(ScalarKind::Object);

    /// Item descriptor of a list-of or map-of.
    pub fn item(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::ListOf(item) | Self::MapOf(item) => Some(item),
            Self::Scalar(_) | Self::Nested(_) => None,
        }
    }
}

impl From<ScalarKind> for TypeDescriptor {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl From<NestedType> for TypeDescriptor {
    fn from(nested: NestedType) -> Self {
        Self::Nested(nested)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::ListOf(item) => write!(f, "list<{item}>"),
            Self::MapOf(item) => write!(f, "map<{item}>"),
            Self::Nested(nested) => f.write_str(nested.type_name),
        }
    }
}

/// A homogeneous sequence of `item`.
#[must_use]
pub fn list_of(item: impl Into<TypeDescriptor>) -> TypeDescriptor {
    TypeDescriptor::ListOf(Box::new(item.into()))
}

/// A string-keyed container whose values are `item`.
#[must_use]
pub fn map_of(item: impl Into<TypeDescriptor>) -> TypeDescriptor {
    TypeDescriptor::MapOf(Box::new(item.into()))
}

/// A nested bound object of type `T`.
#[must_use]
pub fn nested<T: BoundType>() -> TypeDescriptor {
    TypeDescriptor::Nested(NestedType::of::<T>())
}

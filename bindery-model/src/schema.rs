//! Schemas: the per-type mapping from field names to binding entries.

use crate::{Bound, BoundType, FieldPath, FieldValue, TypeDescriptor, default_for, list_of, map_of, nested};
use std::sync::OnceLock;

/// When a field's implicit default is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultCapture {
    /// The first decode of any instance captures the field's in-memory value
    /// and every later decode through the same schema reuses it.
    #[default]
    FirstDecode,
    /// Every decode recomputes the default from the decoded object's own
    /// current value. Nothing is cached.
    PerDecode,
}

/// Where one field lives in the external tree and what it holds.
#[derive(Debug)]
pub struct BindingEntry {
    path: FieldPath,
    descriptor: TypeDescriptor,
    ignore_on_encode: bool,
    explicit_default: Option<FieldValue>,
    cached_default: OnceLock<FieldValue>,
}

impl BindingEntry {
    pub fn new(path: impl Into<FieldPath>, descriptor: impl Into<TypeDescriptor>) -> Self {
        Self {
            path: path.into(),
            descriptor: descriptor.into(),
            ignore_on_encode: false,
            explicit_default: None,
            cached_default: OnceLock::new(),
        }
    }

    /// Shorthand for a text field.
    pub fn text(path: impl Into<FieldPath>) -> Self {
        Self::new(path, TypeDescriptor::TEXT)
    }

    /// Shorthand for a numeric field.
    pub fn number(path: impl Into<FieldPath>) -> Self {
        Self::new(path, TypeDescriptor::NUMBER)
    }

    /// Shorthand for a boolean field.
    pub fn boolean(path: impl Into<FieldPath>) -> Self {
        Self::new(path, TypeDescriptor::BOOLEAN)
    }

    /// Shorthand for an untyped list field.
    pub fn list(path: impl Into<FieldPath>) -> Self {
        Self::new(path, TypeDescriptor::LIST)
    }

    /// Shorthand for an untyped object field.
    pub fn object(path: impl Into<FieldPath>) -> Self {
        Self::new(path, TypeDescriptor::OBJECT)
    }

    /// Shorthand for a list-of field.
    pub fn list_of(path: impl Into<FieldPath>, item: impl Into<TypeDescriptor>) -> Self {
        Self::new(path, list_of(item))
    }

    /// Shorthand for a map-of field.
    pub fn map_of(path: impl Into<FieldPath>, item: impl Into<TypeDescriptor>) -> Self {
        Self::new(path, map_of(item))
    }

    /// Shorthand for a nested bound object.
    pub fn nested<T: BoundType>(path: impl Into<FieldPath>) -> Self {
        Self::new(path, nested::<T>())
    }

    /// Excludes the field from encode output.
    #[must_use]
    pub fn ignore_on_encode(mut self) -> Self {
        self.ignore_on_encode = true;
        self
    }

    /// Declares the field's default. It takes precedence over any value
    /// captured from an instance.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.explicit_default = Some(value.into());
        self
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn is_ignored_on_encode(&self) -> bool {
        self.ignore_on_encode
    }

    pub fn explicit_default(&self) -> Option<&FieldValue> {
        self.explicit_default.as_ref()
    }

    /// Default captured by an earlier decode or by priming, if any.
    pub fn cached_default(&self) -> Option<&FieldValue> {
        self.cached_default.get()
    }

    /// Resolves the fallback for one decode of this field.
    ///
    /// `current` yields the decoded object's present value and is only
    /// called when neither an explicit nor a cached default exists. Under
    /// [`DefaultCapture::FirstDecode`] the result is stored; a concurrent
    /// first decode may win, in which case its value is returned instead.
    pub fn decode_fallback(
        &self,
        capture: DefaultCapture,
        current: impl FnOnce() -> FieldValue,
    ) -> FieldValue {
        if let Some(value) = self.explicit_default.as_ref().or(self.cached_default.get()) {
            return value.clone();
        }

        let computed = self.implicit_default(current());
        if capture == DefaultCapture::FirstDecode && !computed.is_absent() {
            return self.cached_default.get_or_init(|| computed).clone();
        }
        computed
    }

    /// The value substituted by encode when the in-memory value does not fit.
    pub fn encode_fallback(&self) -> FieldValue {
        self.explicit_default
            .as_ref()
            .or(self.cached_default.get())
            .cloned()
            .unwrap_or_else(|| default_for(&self.descriptor))
    }

    fn implicit_default(&self, current: FieldValue) -> FieldValue {
        if current.is_nil() {
            default_for(&self.descriptor)
        } else {
            current
        }
    }

    /// Stores `current` as the captured default unless one is already known.
    fn prime(&self, current: FieldValue) -> bool {
        if self.explicit_default.is_some() {
            return false;
        }
        let value = self.implicit_default(current);
        !value.is_absent() && self.cached_default.set(value).is_ok()
    }
}

/// An ordered set of field bindings for one bound type.
///
/// Schemas are shared by every instance of their type through the
/// [`SchemaRegistry`](crate::SchemaRegistry); captured defaults therefore
/// apply type-wide.
#[derive(Debug)]
pub struct Schema {
    type_name: String,
    entries: Vec<(String, BindingEntry)>,
    capture: DefaultCapture,
}

impl Schema {
    pub fn builder(type_name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            type_name: type_name.into(),
            entries: Vec::new(),
            capture: DefaultCapture::default(),
        }
    }

    /// A schema with no fields, what lookups return for unknown types.
    pub fn empty(type_name: impl Into<String>) -> Self {
        Self::builder(type_name).build()
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_capture(&self) -> DefaultCapture {
        self.capture
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BindingEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn entry(&self, name: &str) -> Option<&BindingEntry> {
        self.entries
            .iter()
            .find_map(|(n, entry)| (n == name).then_some(entry))
    }

    /// Fixes every not-yet-captured default from `prototype`'s current field
    /// values, so no later decode depends on which instance came first.
    /// Returns how many entries were primed.
    pub fn prime_defaults(&self, prototype: &dyn Bound) -> usize {
        self.entries
            .iter()
            .filter(|(name, entry)| entry.prime(prototype.field(name)))
            .count()
    }
}

/// Builder for [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    type_name: String,
    entries: Vec<(String, BindingEntry)>,
    capture: DefaultCapture,
}

impl SchemaBuilder {
    /// Binds a field. Re-binding a name replaces its entry in place.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, entry: BindingEntry) -> Self {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((name, entry)),
        }
        self
    }

    #[must_use]
    pub fn default_capture(mut self, capture: DefaultCapture) -> Self {
        self.capture = capture;
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            type_name: self.type_name,
            entries: self.entries,
            capture: self.capture,
        }
    }
}

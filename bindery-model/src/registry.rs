//! Shared schemas keyed by bound-type identity.
//!
//! Instances never hold their schema; they look it up here by `TypeId`.
//! That keeps one schema (and one set of captured defaults) per type no
//! matter how instances are created or cloned. Two types that happen to share
//! a name in different modules get separate schemas; the schema's type name is
//! only used in messages.

use crate::{Error, Result, Schema};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use tracing::debug;

static GLOBAL: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::new);

/// A set of attached schemas.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<TypeId, Arc<Schema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by bound types by default.
    pub fn global() -> &'static SchemaRegistry {
        &GLOBAL
    }

    /// Attaches `schema` to `T`.
    ///
    /// Fails when the schema has no fields. If `T` already has a schema,
    /// that one is kept and returned, so every constructor call of a type
    /// ends up sharing the first schema attached.
    pub fn attach<T: Any>(&self, schema: Schema) -> Result<Arc<Schema>> {
        validate(&schema)?;
        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        let attached = schemas.entry(TypeId::of::<T>()).or_insert_with(|| {
            debug!(
                type_name = schema.type_name(),
                rust_type = std::any::type_name::<T>(),
                fields = schema.len(),
                "attached schema"
            );
            Arc::new(schema)
        });
        Ok(Arc::clone(attached))
    }

    /// Like [`attach`](Self::attach), but only builds the schema when `T`
    /// has none yet.
    pub fn attach_with<T: Any>(&self, build: impl FnOnce() -> Schema) -> Result<Arc<Schema>> {
        match self.get::<T>() {
            Some(existing) => Ok(existing),
            None => self.attach::<T>(build()),
        }
    }

    /// Swaps in a new schema for `T`, discarding captured defaults.
    /// Instances pick it up on their next decode or encode.
    pub fn replace<T: Any>(&self, schema: Schema) -> Result<Arc<Schema>> {
        validate(&schema)?;
        let schema = Arc::new(schema);
        let previous = self
            .schemas
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<T>(), Arc::clone(&schema));
        debug!(
            type_name = schema.type_name(),
            replaced = previous.is_some(),
            "replaced schema"
        );
        Ok(schema)
    }

    /// The schema attached to `T`, or an empty one.
    pub fn lookup<T: Any>(&self) -> Arc<Schema> {
        self.get::<T>()
            .unwrap_or_else(|| Arc::new(Schema::empty(short_type_name::<T>())))
    }

    pub fn get<T: Any>(&self) -> Option<Arc<Schema>> {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .cloned()
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.get::<T>().is_some()
    }

    pub fn len(&self) -> usize {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `T`'s name without its module path.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

fn validate(schema: &Schema) -> Result<()> {
    if schema.is_empty() {
        return Err(Error::InvalidSchema(schema.type_name().to_string()));
    }
    Ok(())
}

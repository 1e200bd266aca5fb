use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ds_utils::TypeIdMap;

use crate::error::SchemaError;
use crate::schema::{Describable, Schema};

// -----------------------------------------------------------------------------
// SchemaCache

static GLOBAL: SchemaCache = SchemaCache::new();

/// Memoized [`Schema`]s, keyed by type.
///
/// Discovery runs outside the lock. When two threads discover the same
/// type concurrently, the first stored schema wins and both observe it.
/// Failed discoveries are not cached.
pub struct SchemaCache {
    schemas: RwLock<TypeIdMap<Arc<Schema>>>,
}

impl SchemaCache {
    pub const fn new() -> Self {
        Self {
            schemas: RwLock::new(TypeIdMap::new()),
        }
    }

    /// The process-wide cache used by [`schema_for`].
    #[inline]
    pub fn global() -> &'static SchemaCache {
        &GLOBAL
    }

    #[inline]
    fn read(&self) -> RwLockReadGuard<'_, TypeIdMap<Arc<Schema>>> {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write(&self) -> RwLockWriteGuard<'_, TypeIdMap<Arc<Schema>>> {
        self.schemas.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the schema of `T`, discovering it on first use.
    pub fn get_or_discover<T: Describable>(&self) -> Result<Arc<Schema>, SchemaError> {
        if let Some(schema) = self.read().get_type::<T>() {
            return Ok(Arc::clone(schema));
        }

        let schema = match Schema::discover::<T>() {
            Ok(schema) => Arc::new(schema),
            Err(err) => {
                log::debug!("discovery of `{}` failed: {err}", T::type_path());
                return Err(err);
            }
        };
        log::debug!("discovered schema of `{}`", T::type_path());

        let mut schemas = self.write();
        Ok(Arc::clone(schemas.get_or_insert(TypeId::of::<T>(), || schema)))
    }

    /// Returns `true` if the schema of `T` is cached.
    #[inline]
    pub fn contains<T: Describable>(&self) -> bool {
        self.read().contains(&TypeId::of::<T>())
    }

    /// Drops the cached schema of `T`; the next lookup discovers it again.
    pub fn invalidate<T: Describable>(&self) -> bool {
        self.write().remove(&TypeId::of::<T>()).is_some()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the cached schema of `T` from the [global](SchemaCache::global) cache.
#[inline]
pub fn schema_for<T: Describable>() -> Result<Arc<Schema>, SchemaError> {
    GLOBAL.get_or_discover::<T>()
}

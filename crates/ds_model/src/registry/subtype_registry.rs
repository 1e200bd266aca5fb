use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use ds_utils::TypeIdMap;
use ds_utils::hash::HashSet;

use crate::error::{ResolutionError, Result, SchemaError};
use crate::registry::Capability;
use crate::schema::{Describable, Schema, schema_for};

// -----------------------------------------------------------------------------
// Variant

type SchemaFn = fn() -> Result<Arc<Schema>, SchemaError>;

/// Converts a freshly built variant into the capability's trait object.
struct Upcast<B: ?Sized>(Box<dyn Fn(Box<dyn Any>) -> Option<Arc<B>> + Send + Sync>);

/// A concrete type registered under a capability.
pub struct Variant {
    type_id: TypeId,
    type_path: &'static str,
    name: &'static str,
    schema: SchemaFn,
    // An `Upcast<B>` for the capability this variant was registered under.
    upcast: Box<dyn Any + Send + Sync>,
}

impl Variant {
    fn new<B, T>(upcast: fn(T) -> Arc<B>) -> Self
    where
        B: ?Sized + Capability,
        T: Describable,
    {
        let upcast = Upcast::<B>(Box::new(move |object: Box<dyn Any>| {
            object.downcast::<T>().ok().map(|t| upcast(*t))
        }));
        Self {
            type_id: TypeId::of::<T>(),
            type_path: T::type_path(),
            name: T::type_name(),
            schema: schema_for::<T>,
            upcast: Box::new(upcast),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The fully qualified identifier of the variant.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The short display name, unique within a capability unless ambiguous.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the (cached) schema of the variant.
    #[inline]
    pub fn schema(&self) -> Result<Arc<Schema>, SchemaError> {
        (self.schema)()
    }

    /// Wraps an instance built from this variant's schema into `Arc<B>`.
    ///
    /// Returns `None` if `B` is not the capability the variant was
    /// registered under, or `object` is not an instance of the variant.
    pub fn upcast<B: ?Sized + Capability>(&self, object: Box<dyn Any>) -> Option<Arc<B>> {
        let upcast = self.upcast.downcast_ref::<Upcast<B>>()?;
        (upcast.0)(object)
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("type_path", &self.type_path)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// SubtypeRegistry

#[derive(Default)]
struct CapabilityEntry {
    variants: Vec<Variant>,
    ambiguous_names: HashSet<&'static str>,
}

/// The variant-candidate index: capability -> concrete variants.
///
/// The registry is an explicit value handed to the
/// [`Marshaller`](crate::model::Marshaller), never global state.
/// Variants are listed in registration order.
///
/// # Examples
///
/// ```
/// use core::any::Any;
/// use std::sync::Arc;
/// use ds_model::registry::SubtypeRegistry;
/// use ds_model::schema::{Describable, Introspector};
///
/// pub trait Step: Any {}
/// ds_model::capability!(Step);
///
/// struct Noop;
/// impl Step for Noop {}
/// impl Describable for Noop {
///     fn describe(d: &mut Introspector<Self>) {
///         d.designated([], |_| Ok(Noop));
///     }
/// }
///
/// let mut registry = SubtypeRegistry::new();
/// registry.register::<dyn Step, Noop>(|v| Arc::new(v));
///
/// let variant = registry.resolve::<dyn Step>("Noop").unwrap();
/// assert_eq!(variant.type_id(), core::any::TypeId::of::<Noop>());
/// ```
#[derive(Default)]
pub struct SubtypeRegistry {
    capabilities: TypeIdMap<CapabilityEntry>,
}

impl SubtypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            capabilities: TypeIdMap::new(),
        }
    }

    /// Registers `T` as a variant of the capability `B`.
    ///
    /// `upcast` is usually `|v| Arc::new(v)`. Registering the same pair
    /// twice does nothing and returns `false`.
    pub fn register<B, T>(&mut self, upcast: fn(T) -> Arc<B>) -> bool
    where
        B: ?Sized + Capability,
        T: Describable,
    {
        let entry = self
            .capabilities
            .get_or_insert(TypeId::of::<B>(), CapabilityEntry::default);

        if entry.variants.iter().any(|v| v.type_id == TypeId::of::<T>()) {
            return false;
        }

        let variant = Variant::new::<B, T>(upcast);
        if !entry.ambiguous_names.contains(variant.name)
            && entry.variants.iter().any(|v| v.name == variant.name)
        {
            log::warn!(
                "short name `{}` is ambiguous among variants of `{}`",
                variant.name,
                B::capability_path(),
            );
            entry.ambiguous_names.insert(variant.name);
        }

        log::debug!(
            "registered `{}` as a variant of `{}`",
            variant.type_path,
            B::capability_path(),
        );
        entry.variants.push(variant);
        true
    }

    /// Returns all concrete variants of `B`, in registration order.
    pub fn variants<B: ?Sized + Capability>(&self) -> &[Variant] {
        self.variants_by_id(TypeId::of::<B>())
    }

    /// See [`variants`](Self::variants).
    pub fn variants_by_id(&self, base: TypeId) -> &[Variant] {
        match self.capabilities.get(&base) {
            Some(entry) => &entry.variants,
            None => &[],
        }
    }

    /// Returns the set of concrete types implementing `B`.
    pub fn find_subtypes<B: ?Sized + Capability>(&self) -> HashSet<TypeId> {
        self.variants::<B>().iter().map(Variant::type_id).collect()
    }

    /// Returns the variant of `B` whose runtime type is `type_id`.
    pub fn variant_of(&self, base: TypeId, type_id: TypeId) -> Option<&Variant> {
        self.variants_by_id(base)
            .iter()
            .find(|v| v.type_id == type_id)
    }

    /// Returns `true` if `name` is shared by several variants of `base`.
    pub fn is_ambiguous(&self, base: TypeId, name: &str) -> bool {
        self.capabilities
            .get(&base)
            .is_some_and(|entry| entry.ambiguous_names.contains(name))
    }

    /// The discriminator naming `variant` under `base`.
    ///
    /// The short name, unless it is ambiguous or `qualified` is set.
    pub fn discriminator_for(&self, base: TypeId, variant: &Variant, qualified: bool) -> &'static str {
        if qualified || self.is_ambiguous(base, variant.name) {
            variant.type_path
        } else {
            variant.name
        }
    }

    /// Resolves a variant of `B` by short or fully-qualified name.
    ///
    /// A name containing `::` only matches full type paths. Fails with
    /// `NotFound` when no variant matches, including when nothing was
    /// registered under `B`.
    pub fn resolve<B: ?Sized + Capability>(&self, name: &str) -> Result<&Variant, ResolutionError> {
        self.resolve_by_id(TypeId::of::<B>(), B::capability_path(), name)
    }

    /// See [`resolve`](Self::resolve).
    pub fn resolve_by_id(
        &self,
        base: TypeId,
        base_path: &'static str,
        name: &str,
    ) -> Result<&Variant, ResolutionError> {
        let variants = self.variants_by_id(base);
        if name.contains("::") {
            let name = name.trim_start_matches("::");
            return variants
                .iter()
                .find(|v| v.type_path == name)
                .ok_or_else(|| ResolutionError::NotFound {
                    base: base_path,
                    name: name.to_string(),
                });
        }

        let mut candidates = variants.iter().filter(|v| v.name == name);
        match (candidates.next(), candidates.next()) {
            (None, _) => Err(ResolutionError::NotFound {
                base: base_path,
                name: name.to_string(),
            }),
            (Some(variant), None) => Ok(variant),
            (Some(_), Some(_)) => Err(ResolutionError::Ambiguous {
                name: name.to_string(),
                candidates: variants
                    .iter()
                    .filter(|v| v.name == name)
                    .map(|v| v.type_path)
                    .collect(),
            }),
        }
    }

    /// Returns `true` if no capability has variants.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl fmt::Debug for SubtypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.capabilities.values().flat_map(|e| e.variants.iter()))
            .finish()
    }
}

//! The instantiation and uninstantiation engines.
//!
//! ## Menu
//!
//! - [`Marshaller`]: converts between native values and [`Map`]s.
//! - [`MarshalOptions`]: discriminator key and naming.
//! - [`Context`]: where in the object graph a value is being bound.
//!
//! ## Round trip
//!
//! For any `o` built by [`Marshaller::instantiate`], instantiating
//! `uninstantiate(o)` again yields an object with the same constructor
//! arguments and the same settable property values. Settable properties
//! equal to what the constructor alone produces are left out.

// -----------------------------------------------------------------------------
// Modules

mod instantiate;
mod uninstantiate;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// MarshalOptions

use alloc::borrow::Cow;
use alloc::string::String;
use core::any::{TypeId, type_name};

use ds_utils::hash::HashSet;

use crate::coerce;
use crate::data::Data;
use crate::error::{Result, SchemaError};
use crate::registry::{Capability, SubtypeRegistry};
use crate::schema::{Describable, SignatureWriter, schema_for};
use crate::value::{Map, Value};

/// Options of a [`Marshaller`].
///
/// # Examples
///
/// ```
/// use ds_model::model::MarshalOptions;
///
/// let options = MarshalOptions::new().with_discriminator("kind").with_qualified(true);
/// assert_eq!(options.discriminator(), "kind");
/// assert!(options.is_qualified());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarshalOptions {
    discriminator: Cow<'static, str>,
    qualified: bool,
}

impl MarshalOptions {
    /// The discriminator key used unless configured otherwise.
    pub const DEFAULT_DISCRIMINATOR: &'static str = "$class";

    pub const fn new() -> Self {
        Self {
            discriminator: Cow::Borrowed(Self::DEFAULT_DISCRIMINATOR),
            qualified: false,
        }
    }

    /// Sets the reserved key naming the variant of a polymorphic mapping.
    pub fn with_discriminator(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.discriminator = key.into();
        self
    }

    /// Always emit fully qualified discriminators, even when the short
    /// name is unique.
    pub fn with_qualified(mut self, qualified: bool) -> Self {
        self.qualified = qualified;
        self
    }

    #[inline]
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    #[inline]
    pub fn is_qualified(&self) -> bool {
        self.qualified
    }
}

impl Default for MarshalOptions {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Marshaller

/// Converts between native [`Describable`] values and structured [`Map`]s.
///
/// A marshaller only borrows its [`SubtypeRegistry`]; schemas come from the
/// process-wide [`SchemaCache`](crate::schema::SchemaCache). Calls are
/// synchronous, independent and either fully succeed or return one error.
///
/// # Examples
///
/// ```
/// use ds_model::map;
/// use ds_model::model::Marshaller;
/// use ds_model::registry::SubtypeRegistry;
/// use ds_model::schema::{Describable, Introspector, Param};
///
/// #[derive(Debug, PartialEq)]
/// struct Greeting {
///     text: String,
///     loud: bool,
/// }
///
/// impl Describable for Greeting {
///     fn describe(d: &mut Introspector<Self>) {
///         d.designated([Param::of::<String>("text")], |args| {
///             Ok(Greeting { text: args.next()?, loud: false })
///         })
///         .accessor("text", |g| &g.text)
///         .accessor("is_loud", |g| &g.loud)
///         .setter("set_loud", |g, v| g.loud = v);
///     }
/// }
///
/// let registry = SubtypeRegistry::new();
/// let marshaller = Marshaller::new(&registry);
///
/// let greeting: Greeting = marshaller.instantiate(map! { "text" => "hi" }).unwrap();
/// assert_eq!(greeting, Greeting { text: "hi".into(), loud: false });
/// assert_eq!(marshaller.uninstantiate(&greeting).unwrap(), map! { "text" => "hi" });
/// ```
#[derive(Debug)]
pub struct Marshaller<'r> {
    registry: &'r SubtypeRegistry,
    options: MarshalOptions,
}

impl<'r> Marshaller<'r> {
    /// Creates a marshaller with default [`MarshalOptions`].
    #[inline]
    pub fn new(registry: &'r SubtypeRegistry) -> Self {
        Self::with_options(registry, MarshalOptions::new())
    }

    #[inline]
    pub fn with_options(registry: &'r SubtypeRegistry, options: MarshalOptions) -> Self {
        Self { registry, options }
    }

    #[inline]
    pub fn registry(&self) -> &'r SubtypeRegistry {
        self.registry
    }

    #[inline]
    pub fn options(&self) -> &MarshalOptions {
        &self.options
    }

    /// Builds a `T` from a mapping.
    ///
    /// Constructor parameters are bound from their keys, the remaining
    /// keys go through setters. Keys matching neither are ignored.
    pub fn instantiate<T: Describable>(&self, map: Map) -> Result<T> {
        let schema = schema_for::<T>()?;
        let object = self.instantiate_schema(&schema, map)?;
        match object.downcast::<T>() {
            Ok(object) => Ok(*object),
            Err(_) => Err(SchemaError::ReceiverMismatch {
                type_path: T::type_path(),
            }
            .into()),
        }
    }

    /// Builds any [`Data`] from a structured value, including polymorphic
    /// `Arc<dyn Trait>` slots.
    pub fn instantiate_value<T: Data>(&self, value: Value) -> Result<T> {
        T::coerce(value, &Context::new(self, type_name::<T>(), "self"))
    }

    /// Reads `object` back into its minimal mapping.
    pub fn uninstantiate<T: Describable>(&self, object: &T) -> Result<Map> {
        let schema = schema_for::<T>()?;
        self.uninstantiate_schema(&schema, object)
    }

    /// Reads any [`Data`] back into a structured value.
    pub fn uninstantiate_value<T: Data>(&self, object: &T) -> Result<Value> {
        object.uncoerce(&Context::new(self, type_name::<T>(), "self"))
    }

    /// Returns the concrete types registered under `B`.
    #[inline]
    pub fn find_subtypes<B: ?Sized + Capability>(&self) -> HashSet<TypeId> {
        self.registry.find_subtypes::<B>()
    }

    /// Renders the shape of `T` as `Name(param: Type, property?: Type)`.
    pub fn signature<T: Describable>(&self) -> Result<String, SchemaError> {
        let schema = schema_for::<T>()?;
        let mut writer = SignatureWriter::new(self.registry);
        writer.schema(&schema);
        Ok(writer.finish())
    }
}

// -----------------------------------------------------------------------------
// Context

/// The position of a value being bound or read back.
///
/// Handed to every [`Data`] conversion; errors name the declaring type
/// and the property from here.
#[derive(Clone, Copy, Debug)]
pub struct Context<'a> {
    marshaller: &'a Marshaller<'a>,
    owner: &'a str,
    property: &'a str,
}

impl<'a> Context<'a> {
    #[inline]
    pub(crate) fn new(marshaller: &'a Marshaller<'a>, owner: &'a str, property: &'a str) -> Self {
        Self {
            marshaller,
            owner,
            property,
        }
    }

    /// The marshaller driving the conversion, for nested values.
    #[inline]
    pub fn marshaller(&self) -> &'a Marshaller<'a> {
        self.marshaller
    }

    /// Full path of the type declaring the property.
    #[inline]
    pub fn owner(&self) -> &'a str {
        self.owner
    }

    #[inline]
    pub fn property(&self) -> &'a str {
        self.property
    }

    /// Reports `value` as unsuitable for `declared`.
    ///
    /// Shortcut for [`coerce::mismatch`] in hand written [`Data`] impls.
    #[inline]
    pub fn mismatch(&self, declared: &'static str, value: &Value) -> crate::error::Error {
        coerce::mismatch(self, declared, value)
    }
}

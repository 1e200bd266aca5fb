use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};

use crate::data::{Data, DataType};
use crate::error::{Result, SchemaError};
use crate::model::Context;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Describable

/// A type built from one designated constructor plus optional setters.
///
/// `describe` is the static stand-in for runtime introspection: it lists
/// the designated constructor with its ordered parameters, the accessors
/// that read values back, and the setters. [`Schema::discover`] validates
/// the listing.
///
/// # Examples
///
/// ```
/// use ds_model::schema::{Describable, Introspector, Param};
///
/// struct Job {
///     name: String,
///     retries: u8,
///     quiet: bool,
/// }
///
/// impl Describable for Job {
///     fn describe(d: &mut Introspector<Self>) {
///         d.designated([Param::of::<String>("name")], |args| {
///             Ok(Job { name: args.next()?, retries: 0, quiet: false })
///         })
///         .accessor("name", |j| &j.name)
///         .accessor("retries", |j| &j.retries)
///         .accessor("is_quiet", |j| &j.quiet)
///         .setter("set_retries", |j, v| j.retries = v)
///         .setter("set_quiet", |j, v| j.quiet = v);
///     }
/// }
/// ```
///
/// [`Schema::discover`]: crate::schema::Schema::discover
pub trait Describable: Any + Sized {
    /// Lists the constructor, accessors and setters of `Self`.
    fn describe(d: &mut Introspector<Self>);

    /// The fully qualified identifier, accepted as a discriminator.
    #[inline]
    fn type_path() -> &'static str {
        type_name::<Self>()
    }

    /// The short display name, the last segment of [`type_path`](Self::type_path).
    fn type_name() -> &'static str {
        let path = Self::type_path();
        let end = path.find('<').unwrap_or(path.len());
        let start = path[..end].rfind("::").map_or(0, |i| i + 2);
        &path[start..]
    }
}

// -----------------------------------------------------------------------------
// Param

pub(crate) type BindFn = fn(Value, &Context<'_>) -> Result<Box<dyn Any>>;
pub(crate) type AbsentFn = fn() -> Option<Box<dyn Any>>;

fn bind<V: Data>(value: Value, cx: &Context<'_>) -> Result<Box<dyn Any>> {
    V::coerce(value, cx).map(|v| Box::new(v) as Box<dyn Any>)
}

fn absent<V: Data>() -> Option<Box<dyn Any>> {
    V::absent().map(|v| Box::new(v) as Box<dyn Any>)
}

/// A designated constructor parameter: a name and a declared type.
#[derive(Clone)]
pub struct Param {
    pub(crate) name: &'static str,
    pub(crate) type_id: TypeId,
    pub(crate) type_path: &'static str,
    pub(crate) data_type: fn() -> DataType,
    pub(crate) required: bool,
    pub(crate) bind: BindFn,
    pub(crate) absent: AbsentFn,
}

impl Param {
    /// A parameter `name` of declared type `V`.
    ///
    /// It is required when `V` has no [absent value](Data::absent).
    pub fn of<V: Data>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<V>(),
            type_path: type_name::<V>(),
            data_type: V::data_type,
            required: V::absent().is_none(),
            bind: bind::<V>,
            absent: absent::<V>,
        }
    }
}

// -----------------------------------------------------------------------------
// Arguments

/// Bound constructor arguments, read positionally.
pub struct Arguments {
    type_path: &'static str,
    values: alloc::vec::IntoIter<Box<dyn Any>>,
    consumed: usize,
}

impl Arguments {
    pub(crate) fn new(type_path: &'static str, values: Vec<Box<dyn Any>>) -> Self {
        Self {
            type_path,
            values: values.into_iter(),
            consumed: 0,
        }
    }

    /// Takes the next argument, which must be of the declared type `V`.
    pub fn next<V: 'static>(&mut self) -> Result<V> {
        let type_path = self.type_path;
        let index = self.consumed;
        let mismatch = || SchemaError::ArgumentMismatch {
            type_path,
            index,
            requested: type_name::<V>(),
        };

        let value = self.values.next().ok_or_else(mismatch)?;
        self.consumed += 1;
        match value.downcast::<V>() {
            Ok(v) => Ok(*v),
            Err(_) => Err(mismatch().into()),
        }
    }

    /// Number of arguments not read yet.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub(crate) fn consumed(&self) -> usize {
        self.consumed
    }
}

// -----------------------------------------------------------------------------
// Introspector

pub(crate) type ConstructFn = Box<dyn Fn(&mut Arguments) -> Result<Box<dyn Any>> + Send + Sync>;
pub(crate) type ReadFn = Box<dyn Fn(&dyn Any, &Context<'_>) -> Result<Value> + Send + Sync>;
pub(crate) type WriteFn =
    Box<dyn Fn(&mut dyn Any, Value, &Context<'_>) -> Result<()> + Send + Sync>;

pub(crate) struct DesignatedDef {
    pub(crate) params: Vec<Param>,
    pub(crate) construct: ConstructFn,
}

pub(crate) struct AccessorDef {
    pub(crate) method: &'static str,
    pub(crate) type_id: TypeId,
    pub(crate) type_path: &'static str,
    pub(crate) read: ReadFn,
}

pub(crate) struct SetterDef {
    pub(crate) method: &'static str,
    pub(crate) type_id: TypeId,
    pub(crate) type_path: &'static str,
    pub(crate) data_type: fn() -> DataType,
    pub(crate) write: WriteFn,
}

/// Collects what [`Describable::describe`] declares.
///
/// Nothing is checked here; [`Schema::discover`](crate::schema::Schema::discover)
/// validates the whole listing at once.
pub struct Introspector<T> {
    pub(crate) designated: Vec<DesignatedDef>,
    pub(crate) accessors: Vec<AccessorDef>,
    pub(crate) setters: Vec<SetterDef>,
    _marker: core::marker::PhantomData<fn() -> T>,
}

impl<T: Describable> Introspector<T> {
    pub(crate) fn new() -> Self {
        Self {
            designated: Vec::new(),
            accessors: Vec::new(),
            setters: Vec::new(),
            _marker: core::marker::PhantomData,
        }
    }

    /// Declares the designated constructor.
    ///
    /// `build` reads the bound arguments in declaration order with
    /// [`Arguments::next`]. Declaring more than one fails discovery.
    pub fn designated<F>(&mut self, params: impl IntoIterator<Item = Param>, build: F) -> &mut Self
    where
        F: Fn(&mut Arguments) -> Result<T> + Send + Sync + 'static,
    {
        let construct: ConstructFn = Box::new(move |args: &mut Arguments| -> Result<Box<dyn Any>> {
            build(args).map(|t| Box::new(t) as Box<dyn Any>)
        });
        self.designated.push(DesignatedDef {
            params: params.into_iter().collect(),
            construct,
        });
        self
    }

    /// Declares an accessor returning a reference to the value.
    ///
    /// `name` may be `x`, `get_x`, or `is_x` for a `bool`; all read property `x`.
    pub fn accessor<V, F>(&mut self, name: &'static str, f: F) -> &mut Self
    where
        V: Data,
        F: Fn(&T) -> &V + Send + Sync + 'static,
    {
        let read: ReadFn = Box::new(move |object: &dyn Any, cx: &Context<'_>| -> Result<Value> {
            f(receiver::<T>(object)?).uncoerce(cx)
        });
        self.push_accessor::<V>(name, read)
    }

    /// Declares an accessor computing the value.
    pub fn computed<V, F>(&mut self, name: &'static str, f: F) -> &mut Self
    where
        V: Data,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        let read: ReadFn = Box::new(move |object: &dyn Any, cx: &Context<'_>| -> Result<Value> {
            f(receiver::<T>(object)?).uncoerce(cx)
        });
        self.push_accessor::<V>(name, read)
    }

    fn push_accessor<V: Data>(&mut self, method: &'static str, read: ReadFn) -> &mut Self {
        self.accessors.push(AccessorDef {
            method,
            type_id: TypeId::of::<V>(),
            type_path: type_name::<V>(),
            read,
        });
        self
    }

    /// Declares a setter; `name` must be `set_<property>`.
    pub fn setter<V, F>(&mut self, name: &'static str, f: F) -> &mut Self
    where
        V: Data,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let write: WriteFn = Box::new(
            move |object: &mut dyn Any, value: Value, cx: &Context<'_>| -> Result<()> {
                let this = object
                    .downcast_mut::<T>()
                    .ok_or(SchemaError::ReceiverMismatch {
                        type_path: T::type_path(),
                    })?;
                f(this, V::coerce(value, cx)?);
                Ok(())
            },
        );
        self.setters.push(SetterDef {
            method: name,
            type_id: TypeId::of::<V>(),
            type_path: type_name::<V>(),
            data_type: V::data_type,
            write,
        });
        self
    }
}

fn receiver<T: Describable>(object: &dyn Any) -> Result<&T, SchemaError> {
    object
        .downcast_ref::<T>()
        .ok_or(SchemaError::ReceiverMismatch {
            type_path: T::type_path(),
        })
}

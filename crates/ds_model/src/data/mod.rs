//! Declared types of constructor parameters and properties.
//!
//! ## Menu
//!
//! - [`Data`]: converts a native value to and from a [`Value`].
//! - [`DataType`]: a description of a declared type, used in signatures.
//! - [`impl_constants!`](crate::impl_constants): implements `Data` for a
//!   field-less enum by constant name.
//!
//! Implemented for `bool`, integers, floats, `String`, `char`, [`Url`],
//! [`Value`], `Option<T>`, `Vec<T>`, `Box<[T]>`, every
//! [`Describable`](crate::schema::Describable) type and `Arc<B>` for every
//! [`Capability`](crate::registry::Capability) `B`.
//!
//! [`Url`]: url::Url

// -----------------------------------------------------------------------------
// Modules

mod constants;
mod nested;
mod scalar;
mod seq;

// -----------------------------------------------------------------------------
// Data

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use crate::error::{Result, SchemaError};
use crate::model::Context;
use crate::schema::Schema;
use crate::value::Value;

/// A native type that can be bound from and read back to a [`Value`].
pub trait Data: Sized + 'static {
    /// Describes the declared shape of `Self`.
    fn data_type() -> DataType;

    /// Builds `Self` from a structured value.
    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self>;

    /// Reads `self` back into a structured value.
    fn uncoerce(&self, cx: &Context<'_>) -> Result<Value>;

    /// The value passed to a constructor when the parameter is not supplied.
    ///
    /// `None` makes the parameter required.
    #[inline]
    fn absent() -> Option<Self> {
        None
    }
}

// -----------------------------------------------------------------------------
// DataType

/// The shape of a declared type.
#[derive(Clone, Debug)]
pub enum DataType {
    /// Booleans, numbers and strings.
    Scalar(&'static str),
    Char,
    Url,
    /// A pass-through [`Value`].
    Any,
    Enum {
        type_path: &'static str,
        constants: &'static [&'static str],
    },
    /// A concrete describable type, bound without a discriminator.
    Struct {
        type_id: TypeId,
        schema: fn() -> Result<Arc<Schema>, SchemaError>,
    },
    /// A polymorphic slot, bound through the subtype registry.
    Capability { base: TypeId, path: &'static str },
    Array(Box<DataType>),
    List(Box<DataType>),
    Optional(Box<DataType>),
}

/// Strips module paths from a type path: `alloc::vec::Vec<a::B>` -> `Vec<B>`.
pub(crate) fn short_name(path: &str) -> alloc::string::String {
    let mut out = alloc::string::String::with_capacity(path.len());
    let mut segment_start = 0;
    for (i, c) in path.char_indices() {
        match c {
            '<' | '>' | ',' | ' ' | '[' | ']' | ';' | '(' | ')' | '&' => {
                out.push_str(last_segment(&path[segment_start..i]));
                out.push(c);
                segment_start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    out.push_str(last_segment(&path[segment_start..]));
    out
}

fn last_segment(s: &str) -> &str {
    s.rsplit("::").next().unwrap_or(s)
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(path) => f.write_str(&short_name(path)),
            Self::Char => f.write_str("char"),
            Self::Url => f.write_str("Url"),
            Self::Any => f.write_str("Value"),
            Self::Enum { type_path, .. } => f.write_str(&short_name(type_path)),
            Self::Struct { schema, .. } => match schema() {
                Ok(schema) => f.write_str(schema.type_name()),
                Err(_) => f.write_str("?"),
            },
            Self::Capability { path, .. } => {
                f.write_str(short_name(path).trim_start_matches("dyn "))
            }
            Self::Array(inner) | Self::List(inner) => write!(f, "{inner}[]"),
            Self::Optional(inner) => write!(f, "{inner}?"),
        }
    }
}

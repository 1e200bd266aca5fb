//! The language-neutral structured representation.
//!
//! A [`Value`] is a scalar, an ordered sequence of values, or a [`Map`]
//! from property names to values. Maps keep insertion order, but compare
//! equal regardless of order.

// -----------------------------------------------------------------------------
// Modules

mod serde;
mod text;

// -----------------------------------------------------------------------------
// Exports

pub use text::{Interpolated, LazyText};

// -----------------------------------------------------------------------------
// Value

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// Ordered mapping from property name to [`Value`].
pub type Map = indexmap::IndexMap<String, Value>;

/// A structured value.
///
/// # Examples
///
/// ```
/// use ds_model::map;
/// use ds_model::value::Value;
///
/// let value = Value::Map(map! { "text" => "hello", "flag" => true });
/// assert_eq!(value.to_string(), "{text=hello, flag=true}");
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Text that is only rendered on demand, see [`LazyText`].
    Text(Arc<dyn LazyText>),
    Seq(Vec<Value>),
    Map(Map),
}

impl Value {
    /// Wraps a [`LazyText`].
    #[inline]
    pub fn text(text: impl LazyText + 'static) -> Self {
        Self::Text(Arc::new(text))
    }

    /// The runtime kind of this value, as used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "i64",
            Self::Float(_) => "f64",
            Self::String(_) | Self::Text(_) => "string",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "map",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the contained map, if any.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the text of a string value, materializing lazy text.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Text(t) => Some(t.materialize()),
            _ => None,
        }
    }

    /// Replaces lazy text by its materialized string, leaving other values untouched.
    pub fn materialize(self) -> Self {
        match self {
            Self::Text(t) => Self::String(t.materialize()),
            other => other,
        }
    }
}

// -----------------------------------------------------------------------------
// Equality

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::String(_) | Self::Text(_), Self::String(_) | Self::Text(_)) => {
                self.to_text() == other.to_text()
            }
            _ => false,
        }
    }
}

// -----------------------------------------------------------------------------
// Display

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => fmt::Display::fmt(b, f),
            Self::Int(i) => fmt::Display::fmt(i, f),
            Self::Float(x) => fmt::Display::fmt(x, f),
            Self::String(s) => f.write_str(s),
            Self::Text(t) => f.write_str(&t.materialize()),
            Self::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Map> for Value {
    #[inline]
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::Seq(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// -----------------------------------------------------------------------------
// map!

/// Builds a [`Map`] from `key => value` pairs, converting values with [`Into<Value>`].
///
/// ```
/// use ds_model::map;
///
/// let empty = map! {};
/// let nested = map! { "base" => map! { "$class" => "Echo", "text" => "hello" } };
/// assert!(empty.is_empty());
/// assert_eq!(nested.len(), 1);
/// ```
#[macro_export]
macro_rules! map {
    () => {
        $crate::value::Map::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::value::Map::new();
        $(
            map.insert(
                ::core::convert::Into::into($key),
                ::core::convert::Into::<$crate::value::Value>::into($value),
            );
        )+
        map
    }};
}

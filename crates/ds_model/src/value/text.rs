use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Write};

use super::Value;

// -----------------------------------------------------------------------------
// LazyText

/// Text whose content is only produced when asked for.
///
/// Hosts hand such values in (a template, an interpolated literal of a
/// scripting language); the coercion step collapses them to a plain
/// string before any scalar rule applies.
pub trait LazyText: Debug + Send + Sync {
    /// Renders the text.
    fn materialize(&self) -> String;
}

impl LazyText for String {
    #[inline]
    fn materialize(&self) -> String {
        self.clone()
    }
}

// -----------------------------------------------------------------------------
// Interpolated

/// Literal fragments interleaved with values: `s0 v0 s1 v1 ... sn`.
///
/// # Examples
///
/// ```
/// use ds_model::value::{Interpolated, LazyText};
///
/// let text = Interpolated::new(["", " "], ["hello", "world"]);
/// assert_eq!(text.materialize(), "hello world");
/// ```
#[derive(Clone, Debug)]
pub struct Interpolated {
    strings: Vec<String>,
    values: Vec<Value>,
}

impl Interpolated {
    pub fn new<S, V>(
        strings: impl IntoIterator<Item = S>,
        values: impl IntoIterator<Item = V>,
    ) -> Self
    where
        S: Into<String>,
        V: Into<Value>,
    {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl LazyText for Interpolated {
    fn materialize(&self) -> String {
        let mut out = String::new();
        let len = self.strings.len().max(self.values.len());
        for i in 0..len {
            if let Some(s) = self.strings.get(i) {
                out.push_str(s);
            }
            if let Some(v) = self.values.get(i) {
                // Writing into a `String` cannot fail.
                let _ = write!(out, "{v}");
            }
        }
        out
    }
}

impl fmt::Display for Interpolated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.materialize())
    }
}

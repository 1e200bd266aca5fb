//! Scalar and sequence coercion between [`Value`]s and native values.
//!
//! Rules, in order:
//!
//! 1. Lazy text is materialized to a plain string.
//! 2. Identity: the value already has the declared kind, possibly through a
//!    widening numeric rule (`i64` into `f64`, checked narrowing into
//!    smaller integers).
//! 3. String into enum constant (case-sensitive), URL, or single character.
//! 4. Sequences coerce element-wise against the declared element type.
//!
//! Anything else is a [`CoercionError::TypeMismatch`].
//!
//! The [`Data`](crate::data::Data) implementations are thin wrappers over
//! these functions.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::type_name;

use url::Url;

use crate::data::Data;
use crate::error::{CoercionError, Error, Result};
use crate::model::Context;
use crate::value::{Map, Value};

// -----------------------------------------------------------------------------
// Errors

/// Builds the error for a value with no applicable rule.
pub fn mismatch(cx: &Context<'_>, declared: impl Into<Cow<'static, str>>, actual: &Value) -> Error {
    CoercionError::TypeMismatch {
        type_name: cx.owner().to_string(),
        property: cx.property().to_string(),
        declared_type: declared.into(),
        actual_type: actual.type_name(),
    }
    .into()
}

/// Builds the error for a string that names no constant of an enum.
pub fn unknown_constant(
    cx: &Context<'_>,
    declared: &'static str,
    value: String,
    constants: &'static [&'static str],
) -> Error {
    CoercionError::UnknownConstant {
        type_name: cx.owner().to_string(),
        property: cx.property().to_string(),
        declared_type: declared,
        value,
        constants,
    }
    .into()
}

/// Builds the error for a number the declared type cannot hold.
pub fn out_of_range(cx: &Context<'_>, declared: &'static str, value: impl ToString) -> Error {
    CoercionError::OutOfRange {
        type_name: cx.owner().to_string(),
        property: cx.property().to_string(),
        declared_type: declared,
        value: value.to_string(),
    }
    .into()
}

// -----------------------------------------------------------------------------
// Scalars

pub fn boolean(value: Value, cx: &Context<'_>) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(mismatch(cx, "bool", &other)),
    }
}

/// Coerces an integer, rejecting values the target type cannot hold.
pub fn integer<I>(value: Value, cx: &Context<'_>) -> Result<I>
where
    I: TryFrom<i64> + 'static,
{
    match value {
        Value::Int(i) => I::try_from(i).map_err(|_| out_of_range(cx, type_name::<I>(), i)),
        other => Err(mismatch(cx, type_name::<I>(), &other)),
    }
}

/// Coerces a float; integers widen.
pub fn float(value: Value, cx: &Context<'_>) -> Result<f64> {
    match value {
        Value::Float(x) => Ok(x),
        Value::Int(i) => Ok(i as f64),
        other => Err(mismatch(cx, "f64", &other)),
    }
}

/// Narrows a float to `f32`; finite values past `f32::MAX` are rejected.
pub fn float32(value: Value, cx: &Context<'_>) -> Result<f32> {
    let x = float(value, cx)?;
    let narrowed = x as f32;
    if narrowed.is_infinite() && x.is_finite() {
        return Err(out_of_range(cx, "f32", x));
    }
    Ok(narrowed)
}

/// Coerces text, materializing lazy text.
///
/// `declared` names the target type in the error.
pub fn string(value: Value, cx: &Context<'_>, declared: &'static str) -> Result<String> {
    match value.materialize() {
        Value::String(s) => Ok(s),
        other => Err(mismatch(cx, declared, &other)),
    }
}

/// Coerces a string of exactly one character.
pub fn character(value: Value, cx: &Context<'_>) -> Result<char> {
    let text = string(value, cx, "char")?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CoercionError::NotACharacter {
            type_name: cx.owner().to_string(),
            property: cx.property().to_string(),
            value: text,
        }
        .into()),
    }
}

/// Parses a string as an absolute URL.
pub fn url(value: Value, cx: &Context<'_>) -> Result<Url> {
    let text = string(value, cx, type_name::<Url>())?;
    Url::parse(&text).map_err(|e| {
        CoercionError::InvalidUrl {
            type_name: cx.owner().to_string(),
            property: cx.property().to_string(),
            value: text.clone(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Checks that `value` is a mapping, materializing nothing.
pub fn mapping(value: Value, cx: &Context<'_>, declared: &'static str) -> Result<Map> {
    match value {
        Value::Map(map) => Ok(map),
        other => Err(mismatch(cx, declared, &other)),
    }
}

// -----------------------------------------------------------------------------
// Sequences

/// Coerces each element of a sequence against `T`.
///
/// `null` is not a sequence here, see [`optional`] for nullable slots.
pub fn sequence<T: Data>(value: Value, cx: &Context<'_>, declared: &'static str) -> Result<Vec<T>> {
    match value {
        Value::Seq(items) => items.into_iter().map(|item| T::coerce(item, cx)).collect(),
        other => Err(mismatch(cx, declared, &other)),
    }
}

/// Uncoerces each element of a sequence.
pub fn unsequence<T: Data>(items: &[T], cx: &Context<'_>) -> Result<Value> {
    items
        .iter()
        .map(|item| item.uncoerce(cx))
        .collect::<Result<Vec<_>>>()
        .map(Value::Seq)
}

/// `null` maps to `None`, anything else is coerced against `T`.
pub fn optional<T: Data>(value: Value, cx: &Context<'_>) -> Result<Option<T>> {
    match value {
        Value::Null => Ok(None),
        other => T::coerce(other, cx).map(Some),
    }
}

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;

use thiserror::Error;

// -----------------------------------------------------------------------------
// SchemaError

/// A type cannot be described; discovery failed and the type is unusable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("`{type_path}` must declare exactly one designated constructor, found {found}")]
    NoDesignatedConstructor {
        type_path: &'static str,
        found: usize,
    },

    #[error("`{type_path}` declares constructor parameter `{parameter}` more than once")]
    DuplicateParameter {
        type_path: &'static str,
        parameter: &'static str,
    },

    #[error("`{type_path}` declares more than one setter for property `{property}`")]
    DuplicateProperty {
        type_path: &'static str,
        property: &'static str,
    },

    #[error("constructor parameter `{parameter}` of `{type_path}` has no matching accessor")]
    UnreadableParameter {
        type_path: &'static str,
        parameter: &'static str,
    },

    #[error(
        "accessor for `{property}` of `{type_path}` returns `{accessor_type}`, but `{declared_type}` was declared"
    )]
    IncompatibleAccessor {
        type_path: &'static str,
        property: &'static str,
        declared_type: &'static str,
        accessor_type: &'static str,
    },

    #[error("settable property `{property}` of `{type_path}` has no matching accessor")]
    UnreadableProperty {
        type_path: &'static str,
        property: &'static str,
    },

    #[error("`{setter}` of `{type_path}` does not follow the `set_<property>` convention")]
    MalformedSetter {
        type_path: &'static str,
        setter: &'static str,
    },

    #[error(
        "constructor of `{type_path}` read argument {index} as `{requested}`, which does not match its declared parameters"
    )]
    ArgumentMismatch {
        type_path: &'static str,
        index: usize,
        requested: &'static str,
    },

    #[error("constructor of `{type_path}` declares {declared} parameters but read only {consumed}")]
    UnusedArguments {
        type_path: &'static str,
        declared: usize,
        consumed: usize,
    },

    #[error("value handed to `{type_path}` is of a different runtime type")]
    ReceiverMismatch { type_path: &'static str },
}

// -----------------------------------------------------------------------------
// CoercionError

/// A structured value cannot satisfy the declared type of a property.
///
/// Every variant names the declaring type and the property being bound.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoercionError {
    #[error(
        "cannot bind `{property}` of `{type_name}`: expected `{declared_type}`, found `{actual_type}`"
    )]
    TypeMismatch {
        type_name: String,
        property: String,
        declared_type: Cow<'static, str>,
        actual_type: &'static str,
    },

    #[error(
        "cannot bind `{property}` of `{type_name}`: `{value}` is not a constant of `{declared_type}` (expected one of {constants:?})"
    )]
    UnknownConstant {
        type_name: String,
        property: String,
        declared_type: &'static str,
        value: String,
        constants: &'static [&'static str],
    },

    #[error(
        "cannot bind `{property}` of `{type_name}`: expected a single character, found `{value}`"
    )]
    NotACharacter {
        type_name: String,
        property: String,
        value: String,
    },

    #[error("cannot bind `{property}` of `{type_name}`: `{value}` is not a valid URL ({reason})")]
    InvalidUrl {
        type_name: String,
        property: String,
        value: String,
        reason: String,
    },

    #[error("cannot bind `{property}` of `{type_name}`: {value} does not fit in `{declared_type}`")]
    OutOfRange {
        type_name: String,
        property: String,
        declared_type: &'static str,
        value: String,
    },
}

// -----------------------------------------------------------------------------
// InstantiationError

/// Instantiation could not collect the constructor arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InstantiationError {
    #[error("`{type_path}` requires constructor parameter `{parameter}`, which was not supplied")]
    MissingRequiredParameter {
        type_path: &'static str,
        parameter: &'static str,
    },
}

// -----------------------------------------------------------------------------
// ResolutionError

/// A polymorphic slot could not be mapped to a concrete variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolutionError {
    #[error("`{name}` is ambiguous, candidates: {candidates:?}")]
    Ambiguous {
        name: String,
        candidates: Vec<&'static str>,
    },

    #[error("no variant of `{base}` is named `{name}`")]
    NotFound { base: &'static str, name: String },

    #[error("mapping for `{base}` does not carry the `{key}` discriminator")]
    MissingDiscriminator { base: &'static str, key: String },

    #[error("runtime type {type_id:?} is not registered as a variant of `{base}`")]
    UnregisteredVariant { base: &'static str, type_id: TypeId },
}

// -----------------------------------------------------------------------------
// Error

/// Any failure of [`instantiate`] or [`uninstantiate`].
///
/// Calls either fully succeed or report exactly one of these.
///
/// [`instantiate`]: crate::model::Marshaller::instantiate
/// [`uninstantiate`]: crate::model::Marshaller::uninstantiate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Instantiation(#[from] InstantiationError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

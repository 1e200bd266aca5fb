//! Schema discovery: the validated, cached description of a type.
//!
//! ## Menu
//!
//! - [`Describable`]: declares the designated constructor, accessors and
//!   setters of a type through an [`Introspector`].
//! - [`Schema`]: the validated, immutable result, with ordered
//!   [`Parameter`]s and settable [`Property`]s.
//! - [`SchemaCache`] / [`schema_for`]: one schema per type for the life of
//!   the process.
//!
//! ## Accessors
//!
//! Every constructor parameter and every settable property must be
//! readable back. The accessor of property `x` may be declared as `x`,
//! `get_x`, or `is_x` when it returns `bool`. Setters are named `set_x`.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod describable;
mod schema;
mod signature;

// -----------------------------------------------------------------------------
// Exports

pub use cache::{SchemaCache, schema_for};
pub use describable::{Arguments, Describable, Introspector, Param};
pub use schema::{Accessor, Parameter, Property, Schema};

pub(crate) use signature::SignatureWriter;

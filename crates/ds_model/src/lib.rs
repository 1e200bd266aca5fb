#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

// The schema cache locks through `std::sync`; everything else only needs
// `core` and `alloc`.
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod coerce;
pub mod data;
pub mod error;
pub mod model;
pub mod registry;
pub mod schema;
pub mod value;

// -----------------------------------------------------------------------------
// Macro Exports

#[doc(hidden)]
pub mod __macro_exports {
    pub use alloc::sync::Arc;

    #[cfg(feature = "auto_register")]
    pub use inventory;
}

// -----------------------------------------------------------------------------
// Exports

pub use error::{Error, Result};

/// The most commonly used items.
pub mod prelude {
    pub use crate::data::Data;
    pub use crate::map;
    pub use crate::model::{MarshalOptions, Marshaller};
    pub use crate::registry::{Capability, SubtypeRegistry};
    pub use crate::schema::{Describable, Introspector, Param};
    pub use crate::value::{Map, Value};
}

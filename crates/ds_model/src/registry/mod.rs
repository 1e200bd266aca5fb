//! The subtype registry: which concrete variants implement a capability.
//!
//! ## Menu
//!
//! - [`Capability`]: a polymorphic base, implemented for `dyn Trait` by
//!   [`capability!`](crate::capability).
//! - [`SubtypeRegistry`]: capability -> variants, with short and
//!   fully-qualified name resolution.
//! - [`Variant`]: one registered concrete type.
//! - [`AutoRegistration`]: startup registration through `inventory`
//!   (feature `auto_register`), see [`submit_variants!`](crate::submit_variants).
//!
//! Short names are unique per capability for unqualified resolution to
//! succeed; when two variants share one, resolving it fails with
//! [`ResolutionError::Ambiguous`](crate::error::ResolutionError::Ambiguous)
//! and only the full path works.

// -----------------------------------------------------------------------------
// Modules

mod capability;
mod subtype_registry;

#[cfg(feature = "auto_register")]
mod auto_register;

// -----------------------------------------------------------------------------
// Exports

pub use capability::Capability;
pub use subtype_registry::{SubtypeRegistry, Variant};

#[cfg(feature = "auto_register")]
pub use auto_register::AutoRegistration;

#[cfg(not(feature = "auto_register"))]
impl SubtypeRegistry {
    /// Always returns `false` without the `auto_register` feature.
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        false
    }
}

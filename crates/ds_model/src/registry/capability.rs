use core::any::{Any, type_name};

// -----------------------------------------------------------------------------
// Capability

/// A polymorphic base: a trait object whose concrete variants are
/// registered in a [`SubtypeRegistry`](crate::registry::SubtypeRegistry).
///
/// Implemented for `dyn Trait` with the [`capability!`](crate::capability) macro.
/// The trait must have `Any` as a supertrait.
pub trait Capability: Any {
    /// Views a variant as `dyn Any`, exposing its runtime type.
    fn as_any(this: &Self) -> &dyn Any;

    /// Full path of the capability, for messages.
    #[inline]
    fn capability_path() -> &'static str {
        type_name::<Self>()
    }
}

/// Declares traits as [`Capability`]s.
///
/// # Examples
///
/// ```
/// use core::any::Any;
///
/// pub trait Step: Any {}
/// pub trait Marker: Any {}
///
/// ds_model::capability!(Step, Marker);
/// ```
#[macro_export]
macro_rules! capability {
    ($($($base:ident)::+),+ $(,)?) => {
        $(
            impl $crate::registry::Capability for dyn $($base)::+ {
                #[inline]
                fn as_any(this: &Self) -> &dyn ::core::any::Any {
                    this
                }
            }
        )+
    };
}

use crate::__macro_exports::inventory;
use crate::registry::SubtypeRegistry;

// -----------------------------------------------------------------------------
// AutoRegistration

/// A registration hook collected at startup by [`submit_variants!`].
///
/// [`submit_variants!`]: crate::submit_variants
pub struct AutoRegistration {
    register: fn(&mut SubtypeRegistry),
}

impl AutoRegistration {
    #[inline]
    pub const fn new(register: fn(&mut SubtypeRegistry)) -> Self {
        Self { register }
    }
}

inventory::collect!(AutoRegistration);

impl SubtypeRegistry {
    /// Registers every variant submitted with [`submit_variants!`].
    ///
    /// Repeated calls are cheap and insert no duplicates. Returns `false`
    /// if nothing was ever submitted, which is also what unsupported
    /// platforms report.
    ///
    /// [`submit_variants!`]: crate::submit_variants
    pub fn auto_register(&mut self) -> bool {
        let mut any = false;
        for registration in inventory::iter::<AutoRegistration> {
            (registration.register)(self);
            any = true;
        }
        any
    }
}

/// Submits variant registrations to be picked up by
/// [`SubtypeRegistry::auto_register`].
///
/// # Examples
///
/// ```ignore
/// ds_model::submit_variants! {
///     dyn Step => Echo, Toggle;
///     dyn Marker => Echo;
/// }
/// ```
#[macro_export]
macro_rules! submit_variants {
    ($($base:ty => $($ty:ty),+);+ $(;)?) => {
        const _: () = {
            fn __register(registry: &mut $crate::registry::SubtypeRegistry) {
                $($(
                    registry.register::<$base, $ty>(|v| $crate::__macro_exports::Arc::new(v));
                )+)+
            }

            $crate::__macro_exports::inventory::submit! {
                $crate::registry::AutoRegistration::new(__register)
            }
        };
    };
}

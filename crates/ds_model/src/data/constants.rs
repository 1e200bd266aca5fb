/// Implements [`Data`](crate::data::Data) for a field-less enum, bound by
/// the case-sensitive name of each constant.
///
/// Every variant must be listed, the generated `uncoerce` matches exhaustively.
///
/// # Examples
///
/// ```
/// use ds_model::impl_constants;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Level {
///     Low,
///     High,
/// }
///
/// impl_constants!(Level {
///     "LOW" => Level::Low,
///     "HIGH" => Level::High,
/// });
/// ```
#[macro_export]
macro_rules! impl_constants {
    ($ty:ty { $($name:literal => $variant:path),+ $(,)? }) => {
        impl $crate::data::Data for $ty {
            fn data_type() -> $crate::data::DataType {
                $crate::data::DataType::Enum {
                    type_path: ::core::any::type_name::<$ty>(),
                    constants: &[$($name),+],
                }
            }

            fn coerce(
                value: $crate::value::Value,
                cx: &$crate::model::Context<'_>,
            ) -> $crate::error::Result<Self> {
                let declared = ::core::any::type_name::<$ty>();
                let name = $crate::coerce::string(value, cx, declared)?;
                match name.as_str() {
                    $($name => Ok($variant),)+
                    _ => Err($crate::coerce::unknown_constant(cx, declared, name, &[$($name),+])),
                }
            }

            fn uncoerce(
                &self,
                _cx: &$crate::model::Context<'_>,
            ) -> $crate::error::Result<$crate::value::Value> {
                let name: &'static str = match self {
                    $($variant => $name,)+
                };
                Ok($crate::value::Value::from(name))
            }
        }
    };
}

use alloc::string::ToString;
use alloc::sync::Arc;
use core::any::{Any, TypeId};

use crate::coerce;
use crate::data::{Data, DataType};
use crate::error::{ResolutionError, Result};
use crate::model::Context;
use crate::registry::Capability;
use crate::schema::{Describable, schema_for};
use crate::value::{Map, Value};

// -----------------------------------------------------------------------------
// Concrete nested types

/// A concrete slot: the mapping is the body of `T`, no discriminator needed.
impl<T: Describable> Data for T {
    fn data_type() -> DataType {
        DataType::Struct {
            type_id: TypeId::of::<T>(),
            schema: schema_for::<T>,
        }
    }

    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        let map = coerce::mapping(value, cx, T::type_path())?;
        cx.marshaller().instantiate::<T>(map)
    }

    #[inline]
    fn uncoerce(&self, cx: &Context<'_>) -> Result<Value> {
        cx.marshaller().uninstantiate(self).map(Value::Map)
    }
}

// -----------------------------------------------------------------------------
// Polymorphic slots

/// A polymorphic slot: the mapping names its variant under the
/// discriminator key, the rest is the body of that variant.
impl<B: ?Sized + Capability> Data for Arc<B> {
    fn data_type() -> DataType {
        DataType::Capability {
            base: TypeId::of::<B>(),
            path: B::capability_path(),
        }
    }

    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        let marshaller = cx.marshaller();
        let key = marshaller.options().discriminator();

        let mut map = coerce::mapping(value, cx, B::capability_path())?;
        let Some(name) = map.shift_remove(key) else {
            return Err(ResolutionError::MissingDiscriminator {
                base: B::capability_path(),
                key: key.to_string(),
            }
            .into());
        };
        let name = coerce::string(name, cx, "discriminator")?;

        let variant = marshaller.registry().resolve::<B>(&name)?;
        let schema = variant.schema()?;
        let object = marshaller.instantiate_schema(&schema, map)?;
        variant.upcast::<B>(object).ok_or_else(|| {
            ResolutionError::UnregisteredVariant {
                base: B::capability_path(),
                type_id: variant.type_id(),
            }
            .into()
        })
    }

    fn uncoerce(&self, cx: &Context<'_>) -> Result<Value> {
        let marshaller = cx.marshaller();
        let registry = marshaller.registry();
        let base = TypeId::of::<B>();

        let object: &dyn Any = B::as_any(self);
        let type_id = (*object).type_id();
        let variant = registry
            .variant_of(base, type_id)
            .ok_or(ResolutionError::UnregisteredVariant {
                base: B::capability_path(),
                type_id,
            })?;

        let discriminator =
            registry.discriminator_for(base, variant, marshaller.options().is_qualified());
        let schema = variant.schema()?;
        let body = marshaller.uninstantiate_schema(&schema, object)?;

        let mut map = Map::with_capacity(body.len() + 1);
        map.insert(
            marshaller.options().discriminator().to_string(),
            Value::from(discriminator),
        );
        map.extend(body);
        Ok(Value::Map(map))
    }
}

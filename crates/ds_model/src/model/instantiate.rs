use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use crate::error::{InstantiationError, Result};
use crate::model::{Context, Marshaller};
use crate::schema::{Parameter, Schema};
use crate::value::{Map, Value};

impl Marshaller<'_> {
    /// Builds an instance of the type described by `schema` from `map`.
    ///
    /// 1. Each constructor parameter takes its key out of `map`. A missing
    ///    or `null` key falls back to the parameter's absent value, or fails
    ///    if the parameter is required.
    /// 2. The designated constructor runs on the bound arguments.
    /// 3. Every remaining key with a setter is applied in map order; other
    ///    keys are ignored.
    pub(crate) fn instantiate_schema(&self, schema: &Schema, mut map: Map) -> Result<Box<dyn Any>> {
        let owner = schema.type_path();

        let mut args = Vec::with_capacity(schema.parameters().len());
        for parameter in schema.parameters() {
            let cx = Context::new(self, owner, parameter.name());
            args.push(bind(schema, parameter, map.shift_remove(parameter.name()), &cx)?);
        }

        let mut object = schema.construct(args)?;

        for (key, value) in map {
            match schema.property(&key) {
                Some(property) => {
                    let cx = Context::new(self, owner, property.name());
                    property.set(&mut *object, value, &cx)?;
                }
                None => log::trace!("ignoring `{key}`, not a property of `{owner}`"),
            }
        }

        Ok(object)
    }
}

/// Binds one constructor argument; shared with the reference instance
/// built during uninstantiation.
pub(crate) fn bind(
    schema: &Schema,
    parameter: &Parameter,
    value: Option<Value>,
    cx: &Context<'_>,
) -> Result<Box<dyn Any>> {
    match value {
        Some(value) if !value.is_null() => parameter.bind(value, cx),
        _ => parameter.absent().ok_or_else(|| {
            InstantiationError::MissingRequiredParameter {
                type_path: schema.type_path(),
                parameter: parameter.name(),
            }
            .into()
        }),
    }
}

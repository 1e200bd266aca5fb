use alloc::string::ToString;
use alloc::vec::Vec;
use core::any::Any;

use crate::error::Result;
use crate::model::instantiate::bind;
use crate::model::{Context, Marshaller};
use crate::schema::Schema;
use crate::value::Map;

impl Marshaller<'_> {
    /// Reads `object`, an instance of the type described by `schema`, back
    /// into a mapping.
    ///
    /// Constructor parameters are always written unless `null`. A reference
    /// instance is then built from those same arguments without any setter
    /// call, and a settable property is written only when its value differs
    /// from the one read from the reference instance.
    pub(crate) fn uninstantiate_schema(&self, schema: &Schema, object: &dyn Any) -> Result<Map> {
        let owner = schema.type_path();
        let mut map = Map::with_capacity(schema.parameters().len());

        let mut args = Vec::with_capacity(schema.parameters().len());
        for parameter in schema.parameters() {
            let cx = Context::new(self, owner, parameter.name());
            let value = schema.read(parameter.name(), object, &cx)?;
            if value.is_null() {
                args.push(bind(schema, parameter, None, &cx)?);
            } else {
                args.push(bind(schema, parameter, Some(value.clone()), &cx)?);
                map.insert(parameter.name().to_string(), value);
            }
        }

        let mut properties = schema
            .properties()
            .filter(|p| schema.parameter(p.name()).is_none())
            .peekable();
        if properties.peek().is_none() {
            return Ok(map);
        }

        let reference = schema.construct(args)?;
        for property in properties {
            let cx = Context::new(self, owner, property.name());
            let current = schema.read(property.name(), object, &cx)?;
            let default = schema.read(property.name(), &*reference, &cx)?;
            if current != default {
                map.insert(property.name().to_string(), current);
            }
        }

        Ok(map)
    }
}

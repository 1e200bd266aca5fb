use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt::Write;

use crate::data::{DataType, short_name};
use crate::registry::SubtypeRegistry;
use crate::schema::Schema;

/// Renders schemas as `Name(param: Type, property?: Type)`.
///
/// Capabilities list their registered variants, `Step{Echo(..) | Toggle(..)}`.
/// A type already being rendered further up prints as its bare name.
pub(crate) struct SignatureWriter<'a> {
    registry: &'a SubtypeRegistry,
    visiting: Vec<TypeId>,
    out: String,
}

impl<'a> SignatureWriter<'a> {
    pub(crate) fn new(registry: &'a SubtypeRegistry) -> Self {
        Self {
            registry,
            visiting: Vec::new(),
            out: String::new(),
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    pub(crate) fn schema(&mut self, schema: &Schema) {
        self.out.push_str(schema.type_name());
        if self.visiting.contains(&schema.type_id()) {
            return;
        }
        self.visiting.push(schema.type_id());

        self.out.push('(');
        let mut first = true;
        for parameter in schema.parameters() {
            self.separator(&mut first, ", ");
            self.out.push_str(parameter.name());
            self.out.push_str(": ");
            self.data_type(parameter.data_type());
        }
        for property in schema.properties() {
            if schema.parameter(property.name()).is_some() {
                continue;
            }
            self.separator(&mut first, ", ");
            self.out.push_str(property.name());
            self.out.push_str("?: ");
            self.data_type(property.data_type());
        }
        self.out.push(')');

        self.visiting.pop();
    }

    fn separator(&mut self, first: &mut bool, separator: &str) {
        if !core::mem::take(first) {
            self.out.push_str(separator);
        }
    }

    fn data_type(&mut self, data_type: &DataType) {
        match data_type {
            DataType::Enum {
                type_path,
                constants,
            } => {
                self.out.push_str(&short_name(type_path));
                self.out.push('[');
                self.out.push_str(&constants.join(", "));
                self.out.push(']');
            }
            DataType::Struct { schema, .. } => match schema() {
                Ok(schema) => self.schema(&schema),
                Err(_) => self.out.push('?'),
            },
            DataType::Capability { base, .. } => {
                let _ = write!(self.out, "{data_type}");
                self.out.push('{');
                let registry = self.registry;
                let mut first = true;
                for variant in registry.variants_by_id(*base) {
                    self.separator(&mut first, " | ");
                    match variant.schema() {
                        Ok(schema) => self.schema(&schema),
                        Err(_) => self.out.push_str(variant.name()),
                    }
                }
                self.out.push('}');
            }
            DataType::Array(inner) | DataType::List(inner) => {
                self.data_type(inner);
                self.out.push_str("[]");
            }
            DataType::Optional(inner) => self.data_type(inner),
            scalar => {
                let _ = write!(self.out, "{scalar}");
            }
        }
    }
}

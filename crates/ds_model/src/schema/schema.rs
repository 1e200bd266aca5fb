use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use ds_utils::hash::{HashMap, HashSet};
use indexmap::IndexMap;

use crate::data::DataType;
use crate::error::{Result, SchemaError};
use crate::model::Context;
use crate::schema::describable::{
    AbsentFn, AccessorDef, Arguments, BindFn, ConstructFn, Describable, Introspector, ReadFn,
    WriteFn,
};
use crate::value::Value;

// -----------------------------------------------------------------------------
// Parameter

/// A validated designated constructor parameter.
pub struct Parameter {
    name: &'static str,
    type_path: &'static str,
    data_type: DataType,
    required: bool,
    bind: BindFn,
    absent: AbsentFn,
}

impl Parameter {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The full path of the declared type.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Returns `true` if instantiation fails when the key is missing.
    #[inline]
    pub fn is_required(&self) -> bool {
        self.required
    }

    pub(crate) fn bind(&self, value: Value, cx: &Context<'_>) -> Result<Box<dyn Any>> {
        (self.bind)(value, cx)
    }

    pub(crate) fn absent(&self) -> Option<Box<dyn Any>> {
        (self.absent)()
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("type_path", &self.type_path)
            .field("required", &self.required)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Property

/// A property written through a setter after construction.
pub struct Property {
    name: &'static str,
    setter: &'static str,
    type_path: &'static str,
    data_type: DataType,
    write: WriteFn,
}

impl Property {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The setter as declared, `set_<name>`.
    #[inline]
    pub fn setter(&self) -> &'static str {
        self.setter
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub(crate) fn set(&self, object: &mut dyn Any, value: Value, cx: &Context<'_>) -> Result<()> {
        (self.write)(object, value, cx)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("type_path", &self.type_path)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Accessor

/// Reads one property back from an instance.
pub struct Accessor {
    method: &'static str,
    type_id: TypeId,
    type_path: &'static str,
    read: ReadFn,
}

impl Accessor {
    /// The accessor as declared: `x`, `get_x` or `is_x`.
    #[inline]
    pub fn method(&self) -> &'static str {
        self.method
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    pub(crate) fn read(&self, object: &dyn Any, cx: &Context<'_>) -> Result<Value> {
        (self.read)(object, cx)
    }
}

/// Maps an accessor name to the property it reads.
///
/// `is_` only counts for `bool` accessors, `get_` for any.
fn property_name(method: &'static str, is_bool: bool) -> &'static str {
    let stripped = method
        .strip_prefix("get_")
        .or_else(|| is_bool.then(|| method.strip_prefix("is_")).flatten());
    match stripped {
        Some(name) if !name.is_empty() => name,
        _ => method,
    }
}

// -----------------------------------------------------------------------------
// Schema

/// The validated description of a [`Describable`] type.
///
/// Built once per type by [`discover`](Self::discover) and cached by
/// [`schema_for`](crate::schema::schema_for).
pub struct Schema {
    type_id: TypeId,
    type_path: &'static str,
    type_name: &'static str,
    parameters: Box<[Parameter]>,
    accessors: HashMap<&'static str, Accessor>,
    properties: IndexMap<&'static str, Property>,
    construct: ConstructFn,
}

impl Schema {
    /// Runs [`Describable::describe`] for `T` and validates the result.
    ///
    /// Fails when `T` declares other than one designated constructor, a
    /// parameter or settable property cannot be read back by an accessor
    /// of the same declared type, a parameter or setter name repeats, or a
    /// setter breaks the `set_<property>` convention.
    pub fn discover<T: Describable>() -> Result<Self, SchemaError> {
        let type_path = T::type_path();
        let mut d = Introspector::<T>::new();
        T::describe(&mut d);

        let found = d.designated.len();
        let designated = match d.designated.pop() {
            Some(designated) if found == 1 => designated,
            _ => return Err(SchemaError::NoDesignatedConstructor { type_path, found }),
        };

        let mut accessors = HashMap::default();
        for AccessorDef {
            method,
            type_id,
            type_path,
            read,
        } in d.accessors
        {
            let property = property_name(method, type_id == TypeId::of::<bool>());
            accessors.entry(property).or_insert(Accessor {
                method,
                type_id,
                type_path,
                read,
            });
        }

        let check_accessor = |property: &'static str, type_id: TypeId, declared: &'static str| {
            match accessors.get(property) {
                None => Err(property),
                Some(accessor) if accessor.type_id != type_id => {
                    Ok(Some(SchemaError::IncompatibleAccessor {
                        type_path,
                        property,
                        declared_type: declared,
                        accessor_type: accessor.type_path,
                    }))
                }
                Some(_) => Ok(None),
            }
        };

        let mut seen: HashSet<&str> = HashSet::default();
        let mut parameters = Vec::with_capacity(designated.params.len());
        for param in designated.params {
            if !seen.insert(param.name) {
                return Err(SchemaError::DuplicateParameter {
                    type_path,
                    parameter: param.name,
                });
            }
            match check_accessor(param.name, param.type_id, param.type_path) {
                Err(parameter) => {
                    return Err(SchemaError::UnreadableParameter {
                        type_path,
                        parameter,
                    });
                }
                Ok(Some(err)) => return Err(err),
                Ok(None) => {}
            }
            parameters.push(Parameter {
                name: param.name,
                type_path: param.type_path,
                data_type: (param.data_type)(),
                required: param.required,
                bind: param.bind,
                absent: param.absent,
            });
        }

        let mut properties = IndexMap::with_capacity(d.setters.len());
        for setter in d.setters {
            let property = match setter.method.strip_prefix("set_") {
                Some(property) if !property.is_empty() => property,
                _ => {
                    return Err(SchemaError::MalformedSetter {
                        type_path,
                        setter: setter.method,
                    });
                }
            };
            match check_accessor(property, setter.type_id, setter.type_path) {
                Err(property) => {
                    return Err(SchemaError::UnreadableProperty {
                        type_path,
                        property,
                    });
                }
                Ok(Some(err)) => return Err(err),
                Ok(None) => {}
            }
            if properties.contains_key(property) {
                return Err(SchemaError::DuplicateProperty {
                    type_path,
                    property,
                });
            }
            properties.insert(
                property,
                Property {
                    name: property,
                    setter: setter.method,
                    type_path: setter.type_path,
                    data_type: (setter.data_type)(),
                    write: setter.write,
                },
            );
        }

        Ok(Self {
            type_id: TypeId::of::<T>(),
            type_path,
            type_name: T::type_name(),
            parameters: parameters.into_boxed_slice(),
            accessors,
            properties,
            construct: designated.construct,
        })
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The fully qualified identifier of the described type.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The short display name of the described type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Designated constructor parameters, in declaration order.
    #[inline]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Settable properties, in declaration order.
    ///
    /// A name may also be a constructor parameter.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &Property> {
        self.properties.values()
    }

    #[inline]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// The accessor reading property `name`.
    #[inline]
    pub fn accessor(&self, name: &str) -> Option<&Accessor> {
        self.accessors.get(name)
    }

    /// Calls the designated constructor with bound arguments.
    pub(crate) fn construct(&self, values: Vec<Box<dyn Any>>) -> Result<Box<dyn Any>> {
        let mut args = Arguments::new(self.type_path, values);
        let object = (self.construct)(&mut args)?;
        if args.remaining() > 0 {
            return Err(SchemaError::UnusedArguments {
                type_path: self.type_path,
                declared: self.parameters.len(),
                consumed: args.consumed(),
            }
            .into());
        }
        Ok(object)
    }

    /// Reads property `name` from `object` through its accessor.
    pub(crate) fn read(&self, name: &'static str, object: &dyn Any, cx: &Context<'_>) -> Result<Value> {
        match self.accessors.get(name) {
            Some(accessor) => accessor.read(object, cx),
            None => Err(SchemaError::UnreadableProperty {
                type_path: self.type_path,
                property: name,
            }
            .into()),
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_path", &self.type_path)
            .field("parameters", &self.parameters)
            .field("properties", &self.properties.values().collect::<Vec<_>>())
            .finish()
    }
}

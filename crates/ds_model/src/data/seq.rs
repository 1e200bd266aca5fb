use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::type_name;

use crate::coerce;
use crate::data::{Data, DataType};
use crate::error::Result;
use crate::model::Context;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Option

impl<T: Data> Data for Option<T> {
    fn data_type() -> DataType {
        DataType::Optional(Box::new(T::data_type()))
    }

    #[inline]
    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        coerce::optional(value, cx)
    }

    fn uncoerce(&self, cx: &Context<'_>) -> Result<Value> {
        match self {
            Some(inner) => inner.uncoerce(cx),
            None => Ok(Value::Null),
        }
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(None)
    }
}

// -----------------------------------------------------------------------------
// Vec

impl<T: Data> Data for Vec<T> {
    fn data_type() -> DataType {
        DataType::List(Box::new(T::data_type()))
    }

    #[inline]
    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        coerce::sequence(value, cx, type_name::<Self>())
    }

    #[inline]
    fn uncoerce(&self, cx: &Context<'_>) -> Result<Value> {
        coerce::unsequence(self, cx)
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(Vec::new())
    }
}

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: Data> Data for Box<[T]> {
    fn data_type() -> DataType {
        DataType::Array(Box::new(T::data_type()))
    }

    #[inline]
    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        coerce::sequence(value, cx, type_name::<Self>()).map(Vec::into_boxed_slice)
    }

    #[inline]
    fn uncoerce(&self, cx: &Context<'_>) -> Result<Value> {
        coerce::unsequence(self, cx)
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(Box::default())
    }
}

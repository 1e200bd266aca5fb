use alloc::string::String;
use core::any::type_name;

use url::Url;

use crate::coerce;
use crate::data::{Data, DataType};
use crate::error::Result;
use crate::model::Context;
use crate::value::Value;

// -----------------------------------------------------------------------------
// bool

impl Data for bool {
    #[inline]
    fn data_type() -> DataType {
        DataType::Scalar("bool")
    }

    #[inline]
    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        coerce::boolean(value, cx)
    }

    #[inline]
    fn uncoerce(&self, _cx: &Context<'_>) -> Result<Value> {
        Ok(Value::Bool(*self))
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(false)
    }
}

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_integer_data {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Data for $ty {
                #[inline]
                fn data_type() -> DataType {
                    DataType::Scalar(type_name::<$ty>())
                }

                #[inline]
                fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
                    coerce::integer::<$ty>(value, cx)
                }

                fn uncoerce(&self, cx: &Context<'_>) -> Result<Value> {
                    // Only `u64`/`usize` above `i64::MAX` fail.
                    i64::try_from(*self)
                        .map(Value::Int)
                        .map_err(|_| coerce::out_of_range(cx, "i64", self))
                }

                #[inline]
                fn absent() -> Option<Self> {
                    Some(0)
                }
            }
        )*
    };
}

impl_integer_data!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// -----------------------------------------------------------------------------
// Floats

impl Data for f64 {
    #[inline]
    fn data_type() -> DataType {
        DataType::Scalar("f64")
    }

    #[inline]
    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        coerce::float(value, cx)
    }

    #[inline]
    fn uncoerce(&self, _cx: &Context<'_>) -> Result<Value> {
        Ok(Value::Float(*self))
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(0.0)
    }
}

impl Data for f32 {
    #[inline]
    fn data_type() -> DataType {
        DataType::Scalar("f32")
    }

    #[inline]
    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        coerce::float32(value, cx)
    }

    #[inline]
    fn uncoerce(&self, _cx: &Context<'_>) -> Result<Value> {
        Ok(Value::Float(*self as f64))
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(0.0)
    }
}

// -----------------------------------------------------------------------------
// Text

impl Data for String {
    #[inline]
    fn data_type() -> DataType {
        DataType::Scalar(type_name::<String>())
    }

    #[inline]
    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        coerce::string(value, cx, type_name::<String>())
    }

    #[inline]
    fn uncoerce(&self, _cx: &Context<'_>) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl Data for char {
    #[inline]
    fn data_type() -> DataType {
        DataType::Char
    }

    #[inline]
    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        coerce::character(value, cx)
    }

    fn uncoerce(&self, _cx: &Context<'_>) -> Result<Value> {
        let mut s = String::with_capacity(self.len_utf8());
        s.push(*self);
        Ok(Value::String(s))
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some('\0')
    }
}

impl Data for Url {
    #[inline]
    fn data_type() -> DataType {
        DataType::Url
    }

    #[inline]
    fn coerce(value: Value, cx: &Context<'_>) -> Result<Self> {
        coerce::url(value, cx)
    }

    #[inline]
    fn uncoerce(&self, _cx: &Context<'_>) -> Result<Value> {
        Ok(Value::String(String::from(self.as_str())))
    }
}

// -----------------------------------------------------------------------------
// Value

impl Data for Value {
    #[inline]
    fn data_type() -> DataType {
        DataType::Any
    }

    #[inline]
    fn coerce(value: Value, _cx: &Context<'_>) -> Result<Self> {
        Ok(value.materialize())
    }

    #[inline]
    fn uncoerce(&self, _cx: &Context<'_>) -> Result<Value> {
        Ok(self.clone())
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(Value::Null)
    }
}

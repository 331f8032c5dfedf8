//! Conversions between [`NativeValue`] and the Rust types scalar callables use.
//!
//! Each implementing type reports its [`NativeType`] as an associated
//! constant, which is how a callable's signature becomes known without
//! invoking it. `i32`, `bool` and `String` are implemented so callables using
//! them still compile; the catalog rejects them at registration.

use llkv_result::{Error, Result};
use llkv_types::{NativeType, NativeValue};

pub trait NativeArgument: Sized {
    const NATIVE_TYPE: NativeType;

    fn from_native(value: &NativeValue) -> Result<Self>;
}

pub trait NativeReturn {
    const NATIVE_TYPE: NativeType;

    fn into_native(self) -> Result<NativeValue>;
}

fn mismatch(expected: NativeType, value: &NativeValue) -> Error {
    Error::InvalidArgumentError(format!(
        "scalar argument expected {expected}, got {}",
        value
            .native_type()
            .map_or_else(|| "NULL".to_string(), |t| t.to_string())
    ))
}

fn unsupported(native: NativeType) -> Error {
    Error::InvalidArgumentError(format!(
        "native type {native} has no catalog representation"
    ))
}

impl NativeArgument for i64 {
    const NATIVE_TYPE: NativeType = NativeType::Int64;

    fn from_native(value: &NativeValue) -> Result<Self> {
        match value {
            NativeValue::Int64(v) => Ok(*v),
            other => Err(mismatch(<Self as NativeArgument>::NATIVE_TYPE, other)),
        }
    }
}

impl NativeArgument for f64 {
    const NATIVE_TYPE: NativeType = NativeType::Float64;

    fn from_native(value: &NativeValue) -> Result<Self> {
        match value {
            NativeValue::Float64(v) => Ok(*v),
            other => Err(mismatch(<Self as NativeArgument>::NATIVE_TYPE, other)),
        }
    }
}

impl NativeArgument for Vec<u8> {
    const NATIVE_TYPE: NativeType = NativeType::Bytes;

    fn from_native(value: &NativeValue) -> Result<Self> {
        match value {
            NativeValue::Bytes(v) => Ok(v.clone()),
            other => Err(mismatch(<Self as NativeArgument>::NATIVE_TYPE, other)),
        }
    }
}

impl NativeReturn for i64 {
    const NATIVE_TYPE: NativeType = NativeType::Int64;

    fn into_native(self) -> Result<NativeValue> {
        Ok(NativeValue::Int64(self))
    }
}

impl NativeReturn for f64 {
    const NATIVE_TYPE: NativeType = NativeType::Float64;

    fn into_native(self) -> Result<NativeValue> {
        Ok(NativeValue::Float64(self))
    }
}

impl NativeReturn for Vec<u8> {
    const NATIVE_TYPE: NativeType = NativeType::Bytes;

    fn into_native(self) -> Result<NativeValue> {
        Ok(NativeValue::Bytes(self))
    }
}

/// Fallible callables report the representation of their success value.
impl<T: NativeReturn> NativeReturn for Result<T> {
    const NATIVE_TYPE: NativeType = T::NATIVE_TYPE;

    fn into_native(self) -> Result<NativeValue> {
        self?.into_native()
    }
}

macro_rules! impl_unsupported_native {
    ($($t:ty => $native:ident),* $(,)?) => {
        $(
            impl NativeArgument for $t {
                const NATIVE_TYPE: NativeType = NativeType::$native;

                fn from_native(_value: &NativeValue) -> Result<Self> {
                    Err(unsupported(NativeType::$native))
                }
            }

            impl NativeReturn for $t {
                const NATIVE_TYPE: NativeType = NativeType::$native;

                fn into_native(self) -> Result<NativeValue> {
                    Err(unsupported(NativeType::$native))
                }
            }
        )*
    };
}

impl_unsupported_native!(i32 => Int32, bool => Boolean, String => Utf8);

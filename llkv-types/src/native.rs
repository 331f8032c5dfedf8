//! Native representations used by scalar function implementations.
//!
//! A scalar implementation is an ordinary Rust callable. Its parameter and
//! return types are described by [`NativeType`] so the catalog can map them to
//! [`CatalogType`](crate::CatalogType)s once, at registration time. Only
//! `Int64`, `Float64` and `Bytes` have a catalog counterpart; the remaining
//! variants exist so an unsupported signature can be declared and rejected.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Int64,
    Float64,
    Bytes,
    Int32,
    Boolean,
    Utf8,
}

impl NativeType {
    /// The Rust type a callable uses for this representation.
    pub fn rust_name(self) -> &'static str {
        match self {
            NativeType::Int64 => "i64",
            NativeType::Float64 => "f64",
            NativeType::Bytes => "Vec<u8>",
            NativeType::Int32 => "i32",
            NativeType::Boolean => "bool",
            NativeType::Utf8 => "String",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_name())
    }
}

/// Declared parameter and return representations of a scalar callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeSignature {
    pub parameters: Vec<NativeType>,
    pub return_type: NativeType,
}

impl NativeSignature {
    pub fn new(parameters: Vec<NativeType>, return_type: NativeType) -> Self {
        Self {
            parameters,
            return_type,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for NativeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (idx, param) in self.parameters.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            param.fmt(f)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

/// A single runtime value passed to or returned from a scalar callable.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Null,
    Int64(i64),
    Float64(f64),
    Bytes(Vec<u8>),
}

impl NativeValue {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    /// Representation of this value, or `None` for `Null`.
    pub fn native_type(&self) -> Option<NativeType> {
        match self {
            NativeValue::Null => None,
            NativeValue::Int64(_) => Some(NativeType::Int64),
            NativeValue::Float64(_) => Some(NativeType::Float64),
            NativeValue::Bytes(_) => Some(NativeType::Bytes),
        }
    }
}

impl From<i64> for NativeValue {
    fn from(v: i64) -> Self {
        NativeValue::Int64(v)
    }
}

impl From<f64> for NativeValue {
    fn from(v: f64) -> Self {
        NativeValue::Float64(v)
    }
}

impl From<Vec<u8>> for NativeValue {
    fn from(v: Vec<u8>) -> Self {
        NativeValue::Bytes(v)
    }
}

impl From<&[u8]> for NativeValue {
    fn from(v: &[u8]) -> Self {
        NativeValue::Bytes(v.to_vec())
    }
}

impl From<&str> for NativeValue {
    fn from(v: &str) -> Self {
        NativeValue::Bytes(v.as_bytes().to_vec())
    }
}

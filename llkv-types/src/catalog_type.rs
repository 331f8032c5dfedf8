use std::fmt;

use arrow::datatypes::DataType;

/// Value representations the function catalog understands.
///
/// This is a closed set. Every function argument, return value and
/// partial-aggregation state is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogType {
    /// Signed 64-bit integer.
    Int64,
    /// IEEE-754 64-bit float.
    Double,
    /// Opaque variable-length byte sequence. Also carries serialized
    /// aggregation state.
    VarBinary,
}

impl CatalogType {
    pub const ALL: [CatalogType; 3] = [
        CatalogType::Int64,
        CatalogType::Double,
        CatalogType::VarBinary,
    ];

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            CatalogType::Int64 => "int64",
            CatalogType::Double => "double",
            CatalogType::VarBinary => "varbinary",
        }
    }

    /// Arrow type the executor uses for columns of this catalog type.
    #[inline]
    pub fn arrow_data_type(self) -> DataType {
        match self {
            CatalogType::Int64 => DataType::Int64,
            CatalogType::Double => DataType::Float64,
            CatalogType::VarBinary => DataType::Binary,
        }
    }

    /// Inverse of [`CatalogType::arrow_data_type`].
    pub fn from_arrow_data_type(data_type: &DataType) -> Option<Self> {
        match data_type {
            DataType::Int64 => Some(CatalogType::Int64),
            DataType::Float64 => Some(CatalogType::Double),
            DataType::Binary => Some(CatalogType::VarBinary),
            _ => None,
        }
    }
}

impl fmt::Display for CatalogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of one argument at a call site.
///
/// `Unknown` marks an untyped literal such as a bare SQL `NULL`; it never
/// matches a declared parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    Typed(CatalogType),
    Unknown,
}

impl ArgumentType {
    #[inline]
    pub fn catalog_type(self) -> Option<CatalogType> {
        match self {
            ArgumentType::Typed(t) => Some(t),
            ArgumentType::Unknown => None,
        }
    }
}

impl From<CatalogType> for ArgumentType {
    fn from(value: CatalogType) -> Self {
        ArgumentType::Typed(value)
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentType::Typed(t) => t.fmt(f),
            ArgumentType::Unknown => f.write_str("NULL"),
        }
    }
}

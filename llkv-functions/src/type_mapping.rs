//! Native representation to catalog type mapping.
//!
//! Runs once per scalar callable at registration. A callable that passes here
//! can never hit an unmapped type at call time.

use llkv_result::{Error, Result};
use llkv_types::{CatalogType, NativeSignature, NativeType};

/// Map one native representation to its catalog type.
pub fn catalog_type(native: NativeType) -> Result<CatalogType> {
    match native {
        NativeType::Int64 => Ok(CatalogType::Int64),
        NativeType::Float64 => Ok(CatalogType::Double),
        NativeType::Bytes => Ok(CatalogType::VarBinary),
        NativeType::Int32 | NativeType::Boolean | NativeType::Utf8 => {
            Err(Error::configuration(format!("Unhandled type: {native}")))
        }
    }
}

/// Catalog-level view of a native signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSignature {
    pub argument_types: Vec<CatalogType>,
    pub return_type: CatalogType,
}

/// Map every parameter and the return type of `signature`.
///
/// The error names the first offending position.
pub fn map_signature(signature: &NativeSignature) -> Result<CatalogSignature> {
    let argument_types = signature
        .parameters
        .iter()
        .enumerate()
        .map(|(position, native)| {
            catalog_type(*native).map_err(|_| {
                Error::configuration(format!(
                    "unsupported parameter type {native} at position {position}"
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let return_type = catalog_type(signature.return_type).map_err(|_| {
        Error::configuration(format!(
            "unsupported return type {}",
            signature.return_type
        ))
    })?;
    Ok(CatalogSignature {
        argument_types,
        return_type,
    })
}

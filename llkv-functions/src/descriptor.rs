use std::fmt;
use std::sync::Arc;

use llkv_aggregate::AggregationFunction;
use llkv_compute::ScalarKernel;
use llkv_types::{CatalogType, FunctionHandle, QualifiedName};

/// Implementation reference carried by a descriptor.
///
/// The catalog never looks inside; it only compares identities.
#[derive(Debug, Clone)]
pub enum FunctionImplementation {
    Aggregate(Arc<AggregationFunction>),
    Scalar(ScalarKernel),
}

impl FunctionImplementation {
    /// Returns `true` when both references point at the same implementation.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Aggregate(a), Self::Aggregate(b)) => Arc::ptr_eq(a, b),
            (Self::Scalar(a), Self::Scalar(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn as_aggregate(&self) -> Option<&AggregationFunction> {
        match self {
            Self::Aggregate(function) => Some(function),
            Self::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarKernel> {
        match self {
            Self::Scalar(kernel) => Some(kernel),
            Self::Aggregate(_) => None,
        }
    }
}

impl PartialEq for FunctionImplementation {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

/// Immutable metadata for one resolvable function.
///
/// `argument_types.len()` always equals the implementation's arity.
/// `intermediate_type` is present only for aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    handle: FunctionHandle,
    name: QualifiedName,
    argument_types: Vec<CatalogType>,
    return_type: CatalogType,
    intermediate_type: Option<CatalogType>,
    implementation: FunctionImplementation,
}

impl FunctionDescriptor {
    pub(crate) fn aggregate(
        handle: FunctionHandle,
        name: QualifiedName,
        return_type: CatalogType,
        argument_types: Vec<CatalogType>,
        intermediate_type: CatalogType,
        function: Arc<AggregationFunction>,
    ) -> Self {
        Self {
            handle,
            name,
            argument_types,
            return_type,
            intermediate_type: Some(intermediate_type),
            implementation: FunctionImplementation::Aggregate(function),
        }
    }

    pub(crate) fn scalar(
        handle: FunctionHandle,
        name: QualifiedName,
        return_type: CatalogType,
        argument_types: Vec<CatalogType>,
        kernel: ScalarKernel,
    ) -> Self {
        Self {
            handle,
            name,
            argument_types,
            return_type,
            intermediate_type: None,
            implementation: FunctionImplementation::Scalar(kernel),
        }
    }

    #[inline]
    pub fn handle(&self) -> FunctionHandle {
        self.handle
    }

    #[inline]
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    #[inline]
    pub fn argument_types(&self) -> &[CatalogType] {
        &self.argument_types
    }

    #[inline]
    pub fn return_type(&self) -> CatalogType {
        self.return_type
    }

    #[inline]
    pub fn intermediate_type(&self) -> Option<CatalogType> {
        self.intermediate_type
    }

    #[inline]
    pub fn implementation(&self) -> &FunctionImplementation {
        &self.implementation
    }

    #[inline]
    pub fn is_aggregate(&self) -> bool {
        matches!(self.implementation, FunctionImplementation::Aggregate(_))
    }

    /// Displays as `name(arg, ...) -> ret`.
    pub fn signature(&self) -> FunctionSignature<'_> {
        FunctionSignature(self)
    }
}

pub struct FunctionSignature<'a>(&'a FunctionDescriptor);

impl fmt::Display for FunctionSignature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.0;
        write!(f, "{}(", descriptor.name)?;
        for (idx, arg) in descriptor.argument_types.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            arg.fmt(f)?;
        }
        write!(f, ") -> {}", descriptor.return_type)
    }
}

//! The default registration sequence.
//!
//! Order matters: handles follow it, and so does tie-breaking between
//! coercion-eligible overloads.

use llkv_aggregate::AggregationFunction;
use llkv_compute::{math_functions, string_functions};
use llkv_result::Result;
use llkv_types::CatalogType::{Double, Int64, VarBinary};

use crate::builder::CatalogBuilder;
use crate::catalog::FunctionCatalog;

/// Builder preloaded with every built-in aggregate and scalar module.
#[rustfmt::skip]
pub fn builtin_builder() -> CatalogBuilder {
    CatalogBuilder::new()
        .register_aggregate("count", Int64, &[], Int64, AggregationFunction::COUNT)
        .register_aggregate("sum", Int64, &[Int64], Int64, AggregationFunction::LONG_SUM)
        .register_aggregate("sum", Double, &[Double], Double, AggregationFunction::DOUBLE_SUM)
        .register_aggregate("avg", Double, &[Double], VarBinary, AggregationFunction::DOUBLE_AVERAGE)
        .register_aggregate("avg", Double, &[Int64], VarBinary, AggregationFunction::LONG_AVERAGE)
        .register_aggregate("max", Int64, &[Int64], Int64, AggregationFunction::LONG_MAX)
        .register_aggregate("max", Double, &[Double], Double, AggregationFunction::DOUBLE_MAX)
        .register_aggregate("max", VarBinary, &[VarBinary], VarBinary, AggregationFunction::VAR_BINARY_MAX)
        .register_aggregate("min", Int64, &[Int64], Int64, AggregationFunction::LONG_MIN)
        .register_aggregate("min", Double, &[Double], Double, AggregationFunction::DOUBLE_MIN)
        .register_aggregate("min", VarBinary, &[VarBinary], VarBinary, AggregationFunction::VAR_BINARY_MIN)
        .register_scalar_module(string_functions())
        .register_scalar_module(math_functions())
}

impl FunctionCatalog {
    /// The catalog every session starts with.
    pub fn builtin() -> Result<Self> {
        builtin_builder().build()
    }
}

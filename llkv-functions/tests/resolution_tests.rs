use std::sync::Arc;

use arrow::array::{Array, Float64Array};
use llkv_aggregate::AggregationFunction;
use llkv_functions::{CatalogBuilder, FunctionCatalog};
use llkv_result::Error;
use llkv_test_utils::{init_tracing_for_tests, int64_batch};
use llkv_types::ArgumentType::{self, Typed, Unknown};
use llkv_types::CatalogType::{self, Double, Int64, VarBinary};
use llkv_types::QualifiedName;

fn builtin() -> FunctionCatalog {
    init_tracing_for_tests();
    FunctionCatalog::builtin().expect("builtin catalog must build")
}

fn name(s: &str) -> QualifiedName {
    QualifiedName::new(s)
}

fn aggregate_impl(
    catalog: &FunctionCatalog,
    fname: &str,
    args: &[CatalogType],
) -> AggregationFunction {
    catalog
        .resolve_typed(&name(fname), args)
        .unwrap()
        .implementation()
        .as_aggregate()
        .cloned()
        .expect("aggregate implementation")
}

#[test]
fn sum_resolves_by_argument_type() {
    let catalog = builtin();
    assert_eq!(aggregate_impl(&catalog, "sum", &[Int64]), AggregationFunction::LONG_SUM);
    assert_eq!(aggregate_impl(&catalog, "sum", &[Double]), AggregationFunction::DOUBLE_SUM);

    let err = catalog.resolve_typed(&name("sum"), &[Int64, Int64]).unwrap_err();
    assert!(matches!(
        &err,
        Error::FunctionNotFound { name, arguments } if name == "sum" && arguments == "int64, int64"
    ));
    assert_eq!(err.to_string(), "Function sum(int64, int64) not registered");
}

#[test]
fn avg_prefers_exact_int64_overload_over_coercion() {
    let catalog = builtin();
    // The Double overload is registered first and would accept Int64 by coercion.
    let first = catalog.overloads(&name("avg")).next().unwrap();
    assert_eq!(first.argument_types(), &[Double]);

    assert_eq!(aggregate_impl(&catalog, "avg", &[Int64]), AggregationFunction::LONG_AVERAGE);
    assert_eq!(aggregate_impl(&catalog, "avg", &[Double]), AggregationFunction::DOUBLE_AVERAGE);
}

#[test]
fn max_has_no_two_argument_overload() {
    let catalog = builtin();
    let err = catalog.resolve_typed(&name("max"), &[Double, Double]).unwrap_err();
    assert!(matches!(err, Error::FunctionNotFound { .. }));
    assert_eq!(aggregate_impl(&catalog, "max", &[VarBinary]), AggregationFunction::VAR_BINARY_MAX);
}

#[test]
fn names_are_case_insensitive() {
    let catalog = builtin();
    let upper = catalog.resolve_typed(&name("COUNT"), &[]).unwrap();
    let lower = catalog.resolve_typed(&name("count"), &[]).unwrap();
    assert_eq!(upper.handle(), lower.handle());
}

#[test]
fn unknown_function_name_is_not_found() {
    let catalog = builtin();
    let err = catalog.resolve_typed(&name("median"), &[Double]).unwrap_err();
    assert_eq!(err.to_string(), "Function median(double) not registered");
    assert_eq!(catalog.overloads(&name("median")).count(), 0);
}

#[test]
fn untyped_null_argument_renders_as_null() {
    let catalog = builtin();
    let err = catalog.resolve(&name("abs"), &[Unknown]).unwrap_err();
    assert_eq!(err.to_string(), "Function abs(NULL) not registered");

    let err = catalog
        .resolve(&name("pow"), &[Typed(Double), Unknown])
        .unwrap_err();
    assert_eq!(err.to_string(), "Function pow(double, NULL) not registered");
}

#[test]
fn coercion_widens_int64_to_double_only() {
    let catalog = builtin();
    let sqrt = catalog.resolve_typed(&name("sqrt"), &[Int64]).unwrap();
    assert_eq!(sqrt.argument_types(), &[Double]);

    // `mod(int64, double)` has no exact overload and coerces to the double one.
    let m = catalog.resolve_typed(&name("mod"), &[Int64, Double]).unwrap();
    assert_eq!(m.argument_types(), &[Double, Double]);

    // Int64 overloads never accept Double arguments.
    let err = catalog.resolve_typed(&name("length"), &[Int64]).unwrap_err();
    assert!(matches!(err, Error::FunctionNotFound { .. }));
}

#[test]
fn int64_overload_is_never_selected_for_double() {
    let catalog = CatalogBuilder::new()
        .register_aggregate("only_long", Int64, &[Int64], Int64, AggregationFunction::LONG_SUM)
        .build()
        .unwrap();
    assert!(catalog.resolve_typed(&name("only_long"), &[Double]).is_err());
    assert!(catalog.resolve_typed(&name("only_long"), &[Int64]).is_ok());
}

#[test]
fn exact_match_wins_regardless_of_registration_order() {
    for double_first in [true, false] {
        let mut builder = CatalogBuilder::new();
        let overloads: [(CatalogType, AggregationFunction); 2] = [
            (Double, AggregationFunction::DOUBLE_SUM),
            (Int64, AggregationFunction::LONG_SUM),
        ];
        let ordered: Vec<_> = if double_first {
            overloads.to_vec()
        } else {
            overloads.iter().rev().cloned().collect()
        };
        for (arg, function) in ordered {
            builder = builder.register_aggregate("total", arg, &[arg], arg, function);
        }
        let catalog = builder.build().unwrap();
        let resolved = catalog.resolve_typed(&name("total"), &[Int64]).unwrap();
        assert_eq!(resolved.argument_types(), &[Int64], "double_first = {double_first}");
    }
}

#[test]
fn coercion_ties_break_by_registration_order() {
    let catalog = CatalogBuilder::new()
        .register_aggregate(
            "pick",
            Double,
            &[Double, Int64],
            Double,
            AggregationFunction::DOUBLE_SUM,
        )
        .register_aggregate(
            "pick",
            Double,
            &[Int64, Double],
            Double,
            AggregationFunction::DOUBLE_MAX,
        )
        .build()
        .unwrap();
    let resolved = catalog.resolve_typed(&name("pick"), &[Int64, Int64]).unwrap();
    assert_eq!(resolved.argument_types(), &[Double, Int64]);
}

#[test]
fn lookup_returns_the_resolved_descriptor() {
    let catalog = builtin();
    let calls: &[(&str, &[CatalogType])] = &[
        ("count", &[]),
        ("sum", &[Int64]),
        ("avg", &[Int64]),
        ("min", &[VarBinary]),
        ("substr", &[VarBinary, Int64, Int64]),
        ("round", &[Int64]),
    ];
    for (fname, args) in calls {
        let resolved = catalog.resolve_typed(&name(fname), args).unwrap();
        assert_eq!(catalog.lookup(resolved.handle()), Some(resolved));
    }
    for descriptor in catalog.iter() {
        assert_eq!(catalog.lookup(descriptor.handle()), Some(descriptor));
    }
}

#[test]
fn lookup_rejects_handles_from_another_build() {
    let first = builtin();
    let second = builtin();
    let handle = first.resolve_typed(&name("sum"), &[Int64]).unwrap().handle();
    assert!(first.lookup(handle).is_some());
    assert!(second.lookup(handle).is_none());
    assert_ne!(first.instance_id(), second.instance_id());
}

#[test]
fn resolved_aggregate_executes() {
    let catalog = builtin();
    let avg = catalog.resolve_typed(&name("avg"), &[Int64]).unwrap();
    let function = avg.implementation().as_aggregate().unwrap();
    let mut acc = function.create_accumulator();
    acc.update(&int64_batch(&[Some(2), Some(4), None, Some(9)])).unwrap();
    let result = acc.finalize().unwrap();
    let result = result.as_any().downcast_ref::<Float64Array>().unwrap();
    assert_eq!(result.value(0), 5.0);
    assert_eq!(avg.intermediate_type(), Some(VarBinary));
}

#[test]
fn catalog_is_shareable_across_threads() {
    let catalog = Arc::new(builtin());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            std::thread::spawn(move || {
                catalog
                    .resolve(&name("sum"), &[ArgumentType::from(Double)])
                    .map(|d| d.handle())
                    .unwrap()
            })
        })
        .collect();
    let expected = catalog.resolve_typed(&name("sum"), &[Double]).unwrap().handle();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

use arrow::array::{Array, ArrayRef, BinaryArray, Float64Array, Int64Array};
use llkv_aggregate::{AggregateAccumulator, AggregationFunction};
use llkv_result::Error;
use llkv_test_utils::{
    binary_batch, float64_batch, init_tracing_for_tests, int64_batch, row_count_batch,
};

fn as_int64(array: &ArrayRef) -> &Int64Array {
    array.as_any().downcast_ref::<Int64Array>().unwrap()
}

fn as_float64(array: &ArrayRef) -> &Float64Array {
    array.as_any().downcast_ref::<Float64Array>().unwrap()
}

#[test]
fn count_counts_rows_across_batches() {
    init_tracing_for_tests();
    let mut acc = AggregationFunction::COUNT.create_accumulator();
    acc.update(&row_count_batch(3)).unwrap();
    acc.update(&row_count_batch(4)).unwrap();
    let result = acc.finalize().unwrap();
    assert_eq!(as_int64(&result).value(0), 7);
}

#[test]
fn long_sum_skips_nulls_and_is_null_when_empty() {
    let mut acc = AggregationFunction::LONG_SUM.create_accumulator();
    acc.update(&int64_batch(&[Some(1), None, Some(41)])).unwrap();
    assert_eq!(as_int64(&acc.finalize().unwrap()).value(0), 42);

    let mut empty = AggregationFunction::LONG_SUM.create_accumulator();
    empty.update(&int64_batch(&[None, None])).unwrap();
    assert!(empty.finalize().unwrap().is_null(0));
}

#[test]
fn long_sum_overflow_is_an_argument_error() {
    let mut acc = AggregationFunction::LONG_SUM.create_accumulator();
    let err = acc.update(&int64_batch(&[Some(i64::MAX), Some(1)])).unwrap_err();
    assert!(matches!(err, Error::InvalidArgumentError(msg) if msg.contains("exceeds i64")));
}

#[test]
fn long_sum_rejects_double_input() {
    let mut acc = AggregationFunction::LONG_SUM.create_accumulator();
    let err = acc.update(&float64_batch(&[Some(1.0)])).unwrap_err();
    assert!(matches!(err, Error::InvalidArgumentError(_)));
}

#[test]
fn long_average_returns_double() {
    let mut acc = AggregationFunction::LONG_AVERAGE.create_accumulator();
    acc.update(&int64_batch(&[Some(1), Some(2), None])).unwrap();
    let result = acc.finalize().unwrap();
    assert_eq!(as_float64(&result).value(0), 1.5);
}

#[test]
fn average_state_merges_across_partials() {
    let mut left = AggregationFunction::DOUBLE_AVERAGE.create_accumulator();
    left.update(&float64_batch(&[Some(1.0), Some(2.0)])).unwrap();
    let mut right = AggregationFunction::DOUBLE_AVERAGE.create_accumulator();
    right.update(&float64_batch(&[Some(6.0)])).unwrap();

    let left_state = left.state().unwrap();
    let state = left_state.as_any().downcast_ref::<BinaryArray>().unwrap();
    assert_eq!(state.value(0).len(), llkv_aggregate::AVERAGE_STATE_LEN);

    let mut combined = AggregationFunction::DOUBLE_AVERAGE.create_accumulator();
    combined.merge(&left_state).unwrap();
    combined.merge(&right.state().unwrap()).unwrap();
    assert_eq!(combined, AggregateAccumulator::AvgDouble { sum: 9.0, count: 3 });
    assert_eq!(as_float64(&combined.finalize().unwrap()).value(0), 3.0);
}

#[test]
fn average_of_nothing_is_null() {
    let acc = AggregationFunction::LONG_AVERAGE.create_accumulator();
    assert!(acc.finalize().unwrap().is_null(0));
}

#[test]
fn double_min_and_max() {
    let batch = float64_batch(&[Some(2.5), None, Some(-1.0), Some(9.75)]);
    let mut min = AggregationFunction::DOUBLE_MIN.create_accumulator();
    let mut max = AggregationFunction::DOUBLE_MAX.create_accumulator();
    min.update(&batch).unwrap();
    max.update(&batch).unwrap();
    assert_eq!(as_float64(&min.finalize().unwrap()).value(0), -1.0);
    assert_eq!(as_float64(&max.finalize().unwrap()).value(0), 9.75);
}

#[test]
fn var_binary_min_max_merge_partials() {
    let mut a = AggregationFunction::VAR_BINARY_MAX.create_accumulator();
    a.update(&binary_batch(&[Some(b"kiwi".as_slice()), Some(b"apple".as_slice())])).unwrap();
    let mut b = AggregationFunction::VAR_BINARY_MAX.create_accumulator();
    b.update(&binary_batch(&[Some(b"mango".as_slice()), None])).unwrap();

    let mut combined = AggregationFunction::VAR_BINARY_MAX.create_accumulator();
    combined.merge(&a.state().unwrap()).unwrap();
    combined.merge(&b.state().unwrap()).unwrap();
    let result = combined.finalize().unwrap();
    let result = result.as_any().downcast_ref::<BinaryArray>().unwrap();
    assert_eq!(result.value(0), b"mango".as_slice());

    let mut partial_min = AggregationFunction::VAR_BINARY_MIN.create_accumulator();
    partial_min
        .update(&binary_batch(&[Some(b"kiwi".as_slice()), Some(b"apple".as_slice())]))
        .unwrap();
    let mut min = AggregationFunction::VAR_BINARY_MIN.create_accumulator();
    min.merge(&partial_min.state().unwrap()).unwrap();
    let result = min.finalize().unwrap();
    let result = result.as_any().downcast_ref::<BinaryArray>().unwrap();
    assert_eq!(result.value(0), b"apple".as_slice());
}

#[test]
fn count_state_is_int64_and_merges() {
    let mut a = AggregationFunction::COUNT.create_accumulator();
    a.update(&row_count_batch(5)).unwrap();
    let mut total = AggregationFunction::COUNT.create_accumulator();
    total.merge(&a.state().unwrap()).unwrap();
    total.merge(&a.state().unwrap()).unwrap();
    assert_eq!(as_int64(&total.finalize().unwrap()).value(0), 10);
}

#[test]
fn double_min_max_ignore_row_order_with_nan() {
    for values in [[f64::NAN, 1.0], [1.0, f64::NAN]] {
        let batch = float64_batch(&[Some(values[0]), Some(values[1])]);
        let mut max = AggregationFunction::DOUBLE_MAX.create_accumulator();
        max.update(&batch).unwrap();
        let mut min = AggregationFunction::DOUBLE_MIN.create_accumulator();
        min.update(&batch).unwrap();
        assert!(as_float64(&max.finalize().unwrap()).value(0).is_nan());
        assert_eq!(as_float64(&min.finalize().unwrap()).value(0), 1.0);
    }
}

#[test]
fn double_max_merge_is_partition_independent_with_nan() {
    let mut with_nan = AggregationFunction::DOUBLE_MAX.create_accumulator();
    with_nan.update(&float64_batch(&[Some(f64::NAN)])).unwrap();
    let mut plain = AggregationFunction::DOUBLE_MAX.create_accumulator();
    plain.update(&float64_batch(&[Some(2.5)])).unwrap();

    let mut nan_first = AggregationFunction::DOUBLE_MAX.create_accumulator();
    nan_first.merge(&with_nan.state().unwrap()).unwrap();
    nan_first.merge(&plain.state().unwrap()).unwrap();
    let mut nan_last = AggregationFunction::DOUBLE_MAX.create_accumulator();
    nan_last.merge(&plain.state().unwrap()).unwrap();
    nan_last.merge(&with_nan.state().unwrap()).unwrap();

    assert!(as_float64(&nan_first.finalize().unwrap()).value(0).is_nan());
    assert!(as_float64(&nan_last.finalize().unwrap()).value(0).is_nan());
}

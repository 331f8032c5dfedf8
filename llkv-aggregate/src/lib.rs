//! Aggregate implementations registered in the built-in function catalog.
//!
//! The catalog treats these as opaque references. Executors use
//! [`AggregationFunction::create_accumulator`] to get a fresh
//! [`AggregateAccumulator`] per group, feed it argument batches, optionally
//! exchange partial state between workers through [`AggregateAccumulator::state`]
//! and [`AggregateAccumulator::merge`], and finally call
//! [`AggregateAccumulator::finalize`].

use arrow::array::{
    Array, ArrayRef, BinaryArray, BinaryBuilder, Float64Array, Float64Builder, Int64Array,
    Int64Builder, RecordBatch,
};
use llkv_result::Error;
use std::cmp::Ordering;
use std::sync::Arc;

mod state;

pub use state::{AVERAGE_STATE_LEN, decode_average_state, encode_average_state};

pub type AggregateResult<T> = Result<T, Error>;

/// Type of aggregate operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    Count,
    SumInt64,
    SumDouble,
    AvgInt64,
    AvgDouble,
    MinInt64,
    MinDouble,
    MinBinary,
    MaxInt64,
    MaxDouble,
    MaxBinary,
}

/// Named aggregation implementation referenced from a catalog descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationFunction {
    name: &'static str,
    kind: AggregateKind,
}

impl AggregationFunction {
    pub const COUNT: Self = Self::new("count", AggregateKind::Count);
    pub const LONG_SUM: Self = Self::new("long_sum", AggregateKind::SumInt64);
    pub const DOUBLE_SUM: Self = Self::new("double_sum", AggregateKind::SumDouble);
    pub const LONG_AVERAGE: Self = Self::new("long_average", AggregateKind::AvgInt64);
    pub const DOUBLE_AVERAGE: Self = Self::new("double_average", AggregateKind::AvgDouble);
    pub const LONG_MIN: Self = Self::new("long_min", AggregateKind::MinInt64);
    pub const DOUBLE_MIN: Self = Self::new("double_min", AggregateKind::MinDouble);
    pub const VAR_BINARY_MIN: Self = Self::new("var_binary_min", AggregateKind::MinBinary);
    pub const LONG_MAX: Self = Self::new("long_max", AggregateKind::MaxInt64);
    pub const DOUBLE_MAX: Self = Self::new("double_max", AggregateKind::MaxDouble);
    pub const VAR_BINARY_MAX: Self = Self::new("var_binary_max", AggregateKind::MaxBinary);

    pub const fn new(name: &'static str, kind: AggregateKind) -> Self {
        Self { name, kind }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn kind(&self) -> AggregateKind {
        self.kind
    }

    pub fn create_accumulator(&self) -> AggregateAccumulator {
        AggregateAccumulator::new(self.kind)
    }
}

/// Accumulator for incremental aggregate computation
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateAccumulator {
    Count { value: i64 },
    SumInt64 { value: i64, saw_value: bool },
    SumDouble { value: f64, saw_value: bool },
    AvgInt64 { sum: i64, count: i64 },
    AvgDouble { sum: f64, count: i64 },
    MinInt64 { value: Option<i64> },
    MinDouble { value: Option<f64> },
    MinBinary { value: Option<Vec<u8>> },
    MaxInt64 { value: Option<i64> },
    MaxDouble { value: Option<f64> },
    MaxBinary { value: Option<Vec<u8>> },
}

impl AggregateAccumulator {
    pub fn new(kind: AggregateKind) -> Self {
        match kind {
            AggregateKind::Count => AggregateAccumulator::Count { value: 0 },
            AggregateKind::SumInt64 => AggregateAccumulator::SumInt64 {
                value: 0,
                saw_value: false,
            },
            AggregateKind::SumDouble => AggregateAccumulator::SumDouble {
                value: 0.0,
                saw_value: false,
            },
            AggregateKind::AvgInt64 => AggregateAccumulator::AvgInt64 { sum: 0, count: 0 },
            AggregateKind::AvgDouble => AggregateAccumulator::AvgDouble { sum: 0.0, count: 0 },
            AggregateKind::MinInt64 => AggregateAccumulator::MinInt64 { value: None },
            AggregateKind::MinDouble => AggregateAccumulator::MinDouble { value: None },
            AggregateKind::MinBinary => AggregateAccumulator::MinBinary { value: None },
            AggregateKind::MaxInt64 => AggregateAccumulator::MaxInt64 { value: None },
            AggregateKind::MaxDouble => AggregateAccumulator::MaxDouble { value: None },
            AggregateKind::MaxBinary => AggregateAccumulator::MaxBinary { value: None },
        }
    }

    /// Update the accumulator with a batch holding the projected argument
    /// columns. `count` reads only the row count; every other aggregate reads
    /// column 0 and skips nulls.
    pub fn update(&mut self, batch: &RecordBatch) -> AggregateResult<()> {
        match self {
            AggregateAccumulator::Count { value } => {
                let rows = i64::try_from(batch.num_rows()).map_err(|_| {
                    Error::InvalidArgumentError("COUNT result exceeds i64 range".into())
                })?;
                *value = checked_count_add(*value, rows)?;
            }
            AggregateAccumulator::SumInt64 { value, saw_value } => {
                for v in int64_argument(batch, "SUM")?.iter().flatten() {
                    *value = value.checked_add(v).ok_or_else(|| {
                        Error::InvalidArgumentError("SUM aggregate result exceeds i64 range".into())
                    })?;
                    *saw_value = true;
                }
            }
            AggregateAccumulator::SumDouble { value, saw_value } => {
                for v in double_argument(batch, "SUM")?.iter().flatten() {
                    *value += v;
                    *saw_value = true;
                }
            }
            AggregateAccumulator::AvgInt64 { sum, count } => {
                for v in int64_argument(batch, "AVG")?.iter().flatten() {
                    *sum = sum.checked_add(v).ok_or_else(|| {
                        Error::InvalidArgumentError("AVG aggregate sum exceeds i64 range".into())
                    })?;
                    *count = checked_count_add(*count, 1)?;
                }
            }
            AggregateAccumulator::AvgDouble { sum, count } => {
                for v in double_argument(batch, "AVG")?.iter().flatten() {
                    *sum += v;
                    *count = checked_count_add(*count, 1)?;
                }
            }
            AggregateAccumulator::MinInt64 { value } => {
                for v in int64_argument(batch, "MIN")?.iter().flatten() {
                    keep_extreme(value, v, false);
                }
            }
            AggregateAccumulator::MinDouble { value } => {
                for v in double_argument(batch, "MIN")?.iter().flatten() {
                    keep_extreme(value, v, false);
                }
            }
            AggregateAccumulator::MinBinary { value } => {
                for v in binary_argument(batch, "MIN")?.iter().flatten() {
                    keep_extreme_bytes(value, v, false);
                }
            }
            AggregateAccumulator::MaxInt64 { value } => {
                for v in int64_argument(batch, "MAX")?.iter().flatten() {
                    keep_extreme(value, v, true);
                }
            }
            AggregateAccumulator::MaxDouble { value } => {
                for v in double_argument(batch, "MAX")?.iter().flatten() {
                    keep_extreme(value, v, true);
                }
            }
            AggregateAccumulator::MaxBinary { value } => {
                for v in binary_argument(batch, "MAX")?.iter().flatten() {
                    keep_extreme_bytes(value, v, true);
                }
            }
        }
        Ok(())
    }

    /// Partial-aggregation state as a one-row array of the intermediate type.
    pub fn state(&self) -> AggregateResult<ArrayRef> {
        let array: ArrayRef = match self {
            AggregateAccumulator::Count { value } => int64_array(Some(*value)),
            AggregateAccumulator::SumInt64 { value, saw_value } => {
                int64_array(saw_value.then_some(*value))
            }
            AggregateAccumulator::SumDouble { value, saw_value } => {
                float64_array(saw_value.then_some(*value))
            }
            AggregateAccumulator::AvgInt64 { sum, count } => {
                binary_array(Some(encode_average_state(sum.to_le_bytes(), *count).as_slice()))
            }
            AggregateAccumulator::AvgDouble { sum, count } => {
                binary_array(Some(encode_average_state(sum.to_le_bytes(), *count).as_slice()))
            }
            AggregateAccumulator::MinInt64 { value } | AggregateAccumulator::MaxInt64 { value } => {
                int64_array(*value)
            }
            AggregateAccumulator::MinDouble { value }
            | AggregateAccumulator::MaxDouble { value } => float64_array(*value),
            AggregateAccumulator::MinBinary { value }
            | AggregateAccumulator::MaxBinary { value } => binary_array(value.as_deref()),
        };
        Ok(array)
    }

    /// Fold intermediate state produced by [`AggregateAccumulator::state`] on
    /// other accumulators of the same kind. Null state rows are skipped.
    pub fn merge(&mut self, state: &ArrayRef) -> AggregateResult<()> {
        match self {
            AggregateAccumulator::Count { value } => {
                for v in downcast::<Int64Array>(state, "COUNT state")?.iter().flatten() {
                    *value = checked_count_add(*value, v)?;
                }
            }
            AggregateAccumulator::SumInt64 { value, saw_value } => {
                for v in downcast::<Int64Array>(state, "SUM state")?.iter().flatten() {
                    *value = value.checked_add(v).ok_or_else(|| {
                        Error::InvalidArgumentError("SUM aggregate result exceeds i64 range".into())
                    })?;
                    *saw_value = true;
                }
            }
            AggregateAccumulator::SumDouble { value, saw_value } => {
                for v in downcast::<Float64Array>(state, "SUM state")?.iter().flatten() {
                    *value += v;
                    *saw_value = true;
                }
            }
            AggregateAccumulator::AvgInt64 { sum, count } => {
                for bytes in downcast::<BinaryArray>(state, "AVG state")?.iter().flatten() {
                    let (partial_sum, partial_count) = decode_average_state(bytes)?;
                    *sum = sum.checked_add(i64::from_le_bytes(partial_sum)).ok_or_else(|| {
                        Error::InvalidArgumentError("AVG aggregate sum exceeds i64 range".into())
                    })?;
                    *count = checked_count_add(*count, partial_count)?;
                }
            }
            AggregateAccumulator::AvgDouble { sum, count } => {
                for bytes in downcast::<BinaryArray>(state, "AVG state")?.iter().flatten() {
                    let (partial_sum, partial_count) = decode_average_state(bytes)?;
                    *sum += f64::from_le_bytes(partial_sum);
                    *count = checked_count_add(*count, partial_count)?;
                }
            }
            AggregateAccumulator::MinInt64 { value } => {
                for v in downcast::<Int64Array>(state, "MIN state")?.iter().flatten() {
                    keep_extreme(value, v, false);
                }
            }
            AggregateAccumulator::MinDouble { value } => {
                for v in downcast::<Float64Array>(state, "MIN state")?.iter().flatten() {
                    keep_extreme(value, v, false);
                }
            }
            AggregateAccumulator::MinBinary { value } => {
                for v in downcast::<BinaryArray>(state, "MIN state")?.iter().flatten() {
                    keep_extreme_bytes(value, v, false);
                }
            }
            AggregateAccumulator::MaxInt64 { value } => {
                for v in downcast::<Int64Array>(state, "MAX state")?.iter().flatten() {
                    keep_extreme(value, v, true);
                }
            }
            AggregateAccumulator::MaxDouble { value } => {
                for v in downcast::<Float64Array>(state, "MAX state")?.iter().flatten() {
                    keep_extreme(value, v, true);
                }
            }
            AggregateAccumulator::MaxBinary { value } => {
                for v in downcast::<BinaryArray>(state, "MAX state")?.iter().flatten() {
                    keep_extreme_bytes(value, v, true);
                }
            }
        }
        Ok(())
    }

    /// Finalize the accumulator and produce a one-row result array.
    pub fn finalize(self) -> AggregateResult<ArrayRef> {
        let array: ArrayRef = match self {
            AggregateAccumulator::Count { value } => int64_array(Some(value)),
            AggregateAccumulator::SumInt64 { value, saw_value } => {
                int64_array(saw_value.then_some(value))
            }
            AggregateAccumulator::SumDouble { value, saw_value } => {
                float64_array(saw_value.then_some(value))
            }
            AggregateAccumulator::AvgInt64 { sum, count } => {
                float64_array((count > 0).then(|| sum as f64 / count as f64))
            }
            AggregateAccumulator::AvgDouble { sum, count } => {
                float64_array((count > 0).then(|| sum / count as f64))
            }
            AggregateAccumulator::MinInt64 { value } | AggregateAccumulator::MaxInt64 { value } => {
                int64_array(value)
            }
            AggregateAccumulator::MinDouble { value }
            | AggregateAccumulator::MaxDouble { value } => float64_array(value),
            AggregateAccumulator::MinBinary { value }
            | AggregateAccumulator::MaxBinary { value } => binary_array(value.as_deref()),
        };
        Ok(array)
    }
}

fn checked_count_add(current: i64, delta: i64) -> AggregateResult<i64> {
    current
        .checked_add(delta)
        .ok_or_else(|| Error::InvalidArgumentError("COUNT result exceeds i64 range".into()))
}

/// Total order used by MIN and MAX. Floats follow IEEE 754 `totalOrder`, so
/// NaN sorts above every number and the result does not depend on row order.
trait ExtremeOrd: Copy {
    fn extreme_cmp(&self, other: &Self) -> Ordering;
}

impl ExtremeOrd for i64 {
    fn extreme_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl ExtremeOrd for f64 {
    fn extreme_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

fn keep_extreme<T: ExtremeOrd>(current: &mut Option<T>, candidate: T, keep_max: bool) {
    *current = Some(match *current {
        Some(existing) => {
            let ordering = candidate.extreme_cmp(&existing);
            let replace = if keep_max {
                ordering == Ordering::Greater
            } else {
                ordering == Ordering::Less
            };
            if replace { candidate } else { existing }
        }
        None => candidate,
    });
}

fn keep_extreme_bytes(current: &mut Option<Vec<u8>>, candidate: &[u8], keep_max: bool) {
    let replace = match current.as_deref() {
        None => true,
        Some(existing) if keep_max => candidate > existing,
        Some(existing) => candidate < existing,
    };
    if replace {
        *current = Some(candidate.to_vec());
    }
}

fn downcast<'a, T: Array + 'static>(array: &'a ArrayRef, what: &str) -> AggregateResult<&'a T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        Error::InvalidArgumentError(format!(
            "{what} expected a different column type in execution, got {:?}",
            array.data_type()
        ))
    })
}

fn first_argument<'a>(batch: &'a RecordBatch, aggregate: &str) -> AggregateResult<&'a ArrayRef> {
    if batch.num_columns() == 0 {
        return Err(Error::InvalidArgumentError(format!(
            "{aggregate} aggregate requires an argument column"
        )));
    }
    Ok(batch.column(0))
}

fn int64_argument<'a>(batch: &'a RecordBatch, aggregate: &str) -> AggregateResult<&'a Int64Array> {
    let array = first_argument(batch, aggregate)?;
    downcast::<Int64Array>(array, &format!("{aggregate} aggregate (int64)"))
}

fn double_argument<'a>(
    batch: &'a RecordBatch,
    aggregate: &str,
) -> AggregateResult<&'a Float64Array> {
    let array = first_argument(batch, aggregate)?;
    downcast::<Float64Array>(array, &format!("{aggregate} aggregate (double)"))
}

fn binary_argument<'a>(
    batch: &'a RecordBatch,
    aggregate: &str,
) -> AggregateResult<&'a BinaryArray> {
    let array = first_argument(batch, aggregate)?;
    downcast::<BinaryArray>(array, &format!("{aggregate} aggregate (varbinary)"))
}

fn int64_array(value: Option<i64>) -> ArrayRef {
    let mut builder = Int64Builder::with_capacity(1);
    builder.append_option(value);
    Arc::new(builder.finish()) as ArrayRef
}

fn float64_array(value: Option<f64>) -> ArrayRef {
    let mut builder = Float64Builder::with_capacity(1);
    builder.append_option(value);
    Arc::new(builder.finish()) as ArrayRef
}

fn binary_array(value: Option<&[u8]>) -> ArrayRef {
    let mut builder = BinaryBuilder::new();
    builder.append_option(value);
    Arc::new(builder.finish()) as ArrayRef
}

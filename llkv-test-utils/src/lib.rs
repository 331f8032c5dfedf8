//! Shared helpers for LLKV test binaries.

use std::sync::{Arc, Once};

use arrow::array::{ArrayRef, BinaryArray, Float64Array, Int64Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema};

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let env = std::env::var("RUST_LOG").ok();
        let filter = match env {
            Some(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            None => EnvFilter::new("info"),
        };
        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(feature = "auto-init")]
mod auto {
    // Use ctor to run at binary init time to avoid having to call init in every test.
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}

/// Single-column batch of nullable `Int64` values named `arg0`.
pub fn int64_batch(values: &[Option<i64>]) -> RecordBatch {
    single_column_batch(DataType::Int64, Arc::new(Int64Array::from(values.to_vec())))
}

/// Single-column batch of nullable `Float64` values named `arg0`.
pub fn float64_batch(values: &[Option<f64>]) -> RecordBatch {
    single_column_batch(DataType::Float64, Arc::new(Float64Array::from(values.to_vec())))
}

/// Single-column batch of nullable `Binary` values named `arg0`.
pub fn binary_batch(values: &[Option<&[u8]>]) -> RecordBatch {
    single_column_batch(DataType::Binary, Arc::new(BinaryArray::from(values.to_vec())))
}

/// Zero-column batch carrying only a row count, as fed to `count()`.
pub fn row_count_batch(rows: usize) -> RecordBatch {
    let options = arrow::record_batch::RecordBatchOptions::new().with_row_count(Some(rows));
    RecordBatch::try_new_with_options(Arc::new(Schema::empty()), vec![], &options)
        .unwrap_or_else(|err| panic!("failed to build {rows}-row empty batch: {err}"))
}

fn single_column_batch(data_type: DataType, array: ArrayRef) -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![Field::new("arg0", data_type, true)]));
    RecordBatch::try_new(schema, vec![array])
        .unwrap_or_else(|err| panic!("failed to build fixture batch: {err}"))
}

//! Serialized partial state for the average aggregates.
//!
//! Layout (16 bytes): little-endian running sum, then little-endian `i64`
//! count. The sum is an `i64` for `long_average` and an `f64` for
//! `double_average`; both are carried as raw 8-byte words here.

use llkv_result::Error;

use crate::AggregateResult;

pub const AVERAGE_STATE_LEN: usize = 16;

pub fn encode_average_state(sum: [u8; 8], count: i64) -> [u8; AVERAGE_STATE_LEN] {
    let mut out = [0u8; AVERAGE_STATE_LEN];
    out[..8].copy_from_slice(&sum);
    out[8..].copy_from_slice(&count.to_le_bytes());
    out
}

pub fn decode_average_state(bytes: &[u8]) -> AggregateResult<([u8; 8], i64)> {
    if bytes.len() != AVERAGE_STATE_LEN {
        return Err(Error::InvalidArgumentError(format!(
            "AVG state must be {AVERAGE_STATE_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    let mut sum = [0u8; 8];
    sum.copy_from_slice(&bytes[..8]);
    let mut count = [0u8; 8];
    count.copy_from_slice(&bytes[8..]);
    Ok((sum, i64::from_le_bytes(count)))
}

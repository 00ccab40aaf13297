//! Size quantization for action parameters.
//!
//! Resource-size inputs arrive from option maps as integers or numeric
//! strings and must be rounded up to the platform's allocation block size
//! before being used as an action parameter.

use serde_json::Value;

use crate::error::QuantizeError;

/// Memory allocation granularity, in megabytes.
pub const MEMORY_BLOCK_MB: u64 = 4;

/// Round `value` up to the smallest multiple of `block_size` that is >= it.
///
/// Accepts a non-negative integer or a numeric string; exact integer
/// arithmetic throughout, `0 -> 0`. `block_size` must be non-zero.
pub fn round_up_to_block(value: &Value, block_size: u64) -> Result<u64, QuantizeError> {
    if block_size == 0 {
        return Err(QuantizeError::InvalidNumericInput(
            "block size must be non-zero".to_string(),
        ));
    }

    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| QuantizeError::InvalidNumericInput(value.to_string()))?,
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| QuantizeError::InvalidNumericInput(s.clone()))?,
        other => return Err(QuantizeError::InvalidNumericInput(other.to_string())),
    };

    Ok(parsed.div_ceil(block_size) * block_size)
}

/// Round a memory size up to the nearest 4 MB boundary.
pub fn round_to_nearest_4mb(value: &Value) -> Result<u64, QuantizeError> {
    round_up_to_block(value, MEMORY_BLOCK_MB)
}

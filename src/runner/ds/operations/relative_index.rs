//! Index and length arithmetic shared by every sequence operation.
//!
//! Callers hand in already-numeric arguments (`f64`, possibly negative,
//! fractional, `NaN` or infinite). These helpers turn them into offsets in the
//! unsigned 32-bit index domain.

use crate::runner::ds::error::SeqError;

/// Largest representable length, `2^32 - 1`.
pub const MAX_LENGTH: u32 = u32::MAX;

/// Largest valid element index, `2^32 - 2`. Keys at or above `MAX_LENGTH`
/// are not array indices.
pub const MAX_INDEX: u32 = u32::MAX - 1;

/// Truncates toward zero. `NaN` becomes `0`, infinities pass through.
pub fn to_integer_or_infinity(n: f64) -> f64 {
    if n.is_nan() {
        0.0
    } else {
        // Adding 0.0 folds -0 into +0.
        n.trunc() + 0.0
    }
}

/// Resolves a possibly negative start offset against `length`.
pub fn relative_start(requested: f64, length: u32) -> u32 {
    let relative = to_integer_or_infinity(requested);
    let len = length as f64;
    if relative < 0.0 {
        (len + relative).max(0.0) as u32
    } else {
        relative.min(len) as u32
    }
}

/// Like [`relative_start`], with a missing argument meaning `length`.
pub fn relative_end(requested: Option<f64>, length: u32) -> u32 {
    match requested {
        Some(n) => relative_start(n, length),
        None => length,
    }
}

/// Clamps a delete count to `[0, length - start]`.
///
/// A missing count deletes through the end, which is not the same as an
/// explicit `0`.
pub fn clamp_delete_count(requested: Option<f64>, start: u32, length: u32) -> u32 {
    let remaining = length - start;
    match requested {
        None => remaining,
        Some(n) => to_integer_or_infinity(n).max(0.0).min(remaining as f64) as u32,
    }
}

/// `old_length - delete_count + insert_count`, rejecting results above
/// [`MAX_LENGTH`].
pub fn compute_new_length(
    old_length: u32,
    delete_count: u32,
    insert_count: u64,
) -> Result<u32, SeqError> {
    let requested = old_length as u64 - delete_count as u64 + insert_count;
    if requested > MAX_LENGTH as u64 {
        Err(SeqError::LengthOverflow { requested })
    } else {
        Ok(requested as u32)
    }
}

/// Validates a requested array length.
///
/// Valid iff it is a non-negative integer no larger than `2^32 - 1`. `-0` is
/// accepted as `0`.
pub fn to_array_length(requested: f64) -> Result<u32, SeqError> {
    if requested.is_finite()
        && requested >= 0.0
        && requested.fract() == 0.0
        && requested <= MAX_LENGTH as f64
    {
        Ok(requested as u32)
    } else {
        Err(SeqError::InvalidLengthValue(requested))
    }
}

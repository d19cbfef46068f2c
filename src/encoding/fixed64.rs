//! Fixed-width 64-bit little-endian integers
//!
//! Two families write the same eight bytes:
//!
//! - checked: native `i64`/`u64` restricted to `±MAX_SAFE_VALUE`, so values
//!   read back can travel through 53-bit floating point without loss;
//! - wide: `BigInt` values covering the full 64-bit pattern space.
//!
//! Signed and unsigned writers store the same two's-complement pattern; only
//! the readers interpret it differently.

use crate::core::amount::MAX_SAFE_VALUE;
use crate::error::{PrimitivesError, Result};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

const WIDTH: usize = 8;

/// Write `value` as an unsigned 64-bit integer. Negative values are stored
/// as their two's-complement pattern.
pub fn write_u64(dst: &mut [u8], offset: usize, value: i64) -> Result<usize> {
    check_safe(value)?;
    put_le(dst, offset, value as u64)
}

/// Write `value` as a signed 64-bit integer.
pub fn write_i64(dst: &mut [u8], offset: usize, value: i64) -> Result<usize> {
    check_safe(value)?;
    put_le(dst, offset, value as u64)
}

/// Read an unsigned 64-bit integer that must not exceed `MAX_SAFE_VALUE`.
pub fn read_u64(src: &[u8], offset: usize) -> Result<u64> {
    let bits = get_le(src, offset)?;
    if bits > MAX_SAFE_VALUE as u64 {
        return Err(PrimitivesError::Range(format!(
            "Unsigned value {bits} at offset {offset} exceeds 2^53-1"
        )));
    }
    Ok(bits)
}

/// Read a signed 64-bit integer that must lie within `±MAX_SAFE_VALUE`.
pub fn read_i64(src: &[u8], offset: usize) -> Result<i64> {
    let value = get_le(src, offset)? as i64;
    if value.unsigned_abs() > MAX_SAFE_VALUE as u64 {
        return Err(PrimitivesError::Range(format!(
            "Signed value {value} at offset {offset} exceeds 2^53-1"
        )));
    }
    Ok(value)
}

/// Write any value in `[-(2^63), 2^64 - 1]`.
pub fn write_u64_wide(dst: &mut [u8], offset: usize, value: &BigInt) -> Result<usize> {
    let bits = if value.is_negative() {
        value.to_i64().map(|v| v as u64)
    } else {
        value.to_u64()
    };
    let bits = bits.ok_or_else(|| {
        PrimitivesError::Range(format!("Number {value} does not fit in 64 bits"))
    })?;
    put_le(dst, offset, bits)
}

/// Write any value in `[-(2^63), 2^63 - 1]`.
pub fn write_i64_wide(dst: &mut [u8], offset: usize, value: &BigInt) -> Result<usize> {
    let value = value.to_i64().ok_or_else(|| {
        PrimitivesError::Range(format!("Number {value} does not fit in a signed 64-bit integer"))
    })?;
    put_le(dst, offset, value as u64)
}

/// Read the pattern as an unsigned integer.
pub fn read_u64_wide(src: &[u8], offset: usize) -> Result<BigInt> {
    Ok(BigInt::from(get_le(src, offset)?))
}

/// Read the pattern as a two's-complement signed integer.
pub fn read_i64_wide(src: &[u8], offset: usize) -> Result<BigInt> {
    Ok(BigInt::from(get_le(src, offset)? as i64))
}

fn check_safe(value: i64) -> Result<()> {
    if value.unsigned_abs() > MAX_SAFE_VALUE as u64 {
        return Err(PrimitivesError::Range(format!(
            "Number {value} exceeds 2^53-1"
        )));
    }
    Ok(())
}

fn bounds(len: usize, offset: usize, op: &str) -> Result<usize> {
    offset
        .checked_add(WIDTH)
        .filter(|end| *end <= len)
        .ok_or_else(|| {
            PrimitivesError::Encoding(format!(
                "Out of bounds {op}: 8 bytes at offset {offset} in {len} byte buffer"
            ))
        })
}

fn put_le(dst: &mut [u8], offset: usize, bits: u64) -> Result<usize> {
    let end = bounds(dst.len(), offset, "write")?;
    dst[offset..end].copy_from_slice(&bits.to_le_bytes());
    Ok(end)
}

fn get_le(src: &[u8], offset: usize) -> Result<u64> {
    let end = bounds(src.len(), offset, "read")?;
    let mut raw = [0u8; WIDTH];
    raw.copy_from_slice(&src[offset..end]);
    Ok(u64::from_le_bytes(raw))
}

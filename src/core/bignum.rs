//! Arbitrary-precision integer helpers
//!
//! Arithmetic itself comes from `num-bigint`; this module only adds the narrow
//! surface the codecs need: hex parsing, range-checked narrowing and
//! fixed-width byte layouts.

use crate::core::amount::MAX_SAFE_VALUE;
use crate::error::{PrimitivesError, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

/// Byte order for fixed-width layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// Parse a hexadecimal string into a signed big integer.
///
/// Accepts an optional leading `-` and an optional `0x` prefix.
///
/// ```
/// use architect_primitives::core::bignum::parse_hex;
/// use num_bigint::BigInt;
/// assert_eq!(parse_hex("0xff").unwrap(), BigInt::from(255));
/// assert_eq!(parse_hex("-10").unwrap(), BigInt::from(-16));
/// ```
pub fn parse_hex(text: &str) -> Result<BigInt> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .unwrap_or(rest);

    if digits.is_empty() {
        return Err(PrimitivesError::Encoding(format!(
            "Empty hex string: {text:?}"
        )));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(PrimitivesError::Encoding(format!(
            "Invalid hex character {bad:?} in {text:?}"
        )));
    }

    let magnitude = BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| PrimitivesError::Encoding(format!("Invalid hex string: {text:?}")))?;
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Build a non-negative integer from raw bytes in the given order.
pub fn from_fixed_bytes(bytes: &[u8], endian: Endian) -> BigInt {
    match endian {
        Endian::Big => BigInt::from_bytes_be(Sign::Plus, bytes),
        Endian::Little => BigInt::from_bytes_le(Sign::Plus, bytes),
    }
}

/// Extra operations on `BigInt` used across the crate
pub trait BigNumExt {
    /// Bit length of the absolute value; zero has length 0.
    fn bit_length(&self) -> u64;

    /// Narrow to `i64`, failing with a range error when it does not fit.
    fn to_i64_checked(&self) -> Result<i64>;

    /// Narrow to `i64` within `[-MAX_SAFE_VALUE, MAX_SAFE_VALUE]`.
    fn to_safe_i64(&self) -> Result<i64>;

    /// Encode the magnitude into exactly `width` bytes.
    fn to_fixed_bytes(&self, width: usize, endian: Endian) -> Result<Vec<u8>>;
}

impl BigNumExt for BigInt {
    fn bit_length(&self) -> u64 {
        self.magnitude().bits()
    }

    fn to_i64_checked(&self) -> Result<i64> {
        self.to_i64().ok_or_else(|| {
            PrimitivesError::Range(format!("Number {self} does not fit in a 64-bit integer"))
        })
    }

    fn to_safe_i64(&self) -> Result<i64> {
        match self.to_i64() {
            Some(n) if n.unsigned_abs() <= MAX_SAFE_VALUE as u64 => Ok(n),
            _ => Err(PrimitivesError::Range(format!(
                "Number {self} exceeds 2^53-1"
            ))),
        }
    }

    fn to_fixed_bytes(&self, width: usize, endian: Endian) -> Result<Vec<u8>> {
        let needed = self.bit_length().div_ceil(8);
        if needed > width as u64 {
            return Err(PrimitivesError::Range(format!(
                "Number {} needs {needed} bytes, only {width} available",
                self.abs()
            )));
        }

        let mut out = vec![0u8; width];
        if self.is_zero() {
            return Ok(out);
        }

        let be = self.magnitude().to_bytes_be();
        let start = width - be.len();
        out[start..].copy_from_slice(&be);
        if endian == Endian::Little {
            out.reverse();
        }
        Ok(out)
    }
}

//! VarInt-2: self-terminating variable-length unsigned integers
//!
//! Groups of 7 bits are written most-significant first. Every byte except the
//! last carries `0x80`, and each continuation subtracts one from the residual
//! before shifting. That bias makes every byte sequence a distinct value, so
//! `0x80 0x00` means 128 rather than a padded zero.
//!
//! | value  | bytes              |
//! |--------|--------------------|
//! | 127    | `7f`               |
//! | 128    | `80 00`            |
//! | 16511  | `ff 7f`            |
//! | 2^32   | `8e fe fe ff 00`   |

use crate::error::{PrimitivesError, Result};
use num_bigint::BigUint;

// ceil(64 / 7)
const MAX_NATIVE_LEN: usize = 10;

/// Encode a native integer.
pub fn write_varint2(value: u64) -> Vec<u8> {
    let mut tmp = [0u8; MAX_NATIVE_LEN];
    let mut len = 0;
    let mut n = value;

    loop {
        let flag = if len > 0 { 0x80 } else { 0x00 };
        tmp[len] = (n & 0x7f) as u8 | flag;
        if n <= 0x7f {
            break;
        }
        n = (n >> 7) - 1;
        len += 1;
    }

    tmp[..=len].iter().rev().copied().collect()
}

/// Encode `value` into `dst` at `offset`, returning the offset past it.
///
/// Nothing is written if the encoding does not fit.
pub fn write_varint2_into(dst: &mut [u8], offset: usize, value: u64) -> Result<usize> {
    let encoded = write_varint2(value);
    let end = offset
        .checked_add(encoded.len())
        .filter(|end| *end <= dst.len())
        .ok_or_else(|| {
            PrimitivesError::Encoding(format!(
                "Out of bounds write: {} bytes at offset {offset} into {} byte buffer",
                encoded.len(),
                dst.len()
            ))
        })?;
    dst[offset..end].copy_from_slice(&encoded);
    Ok(end)
}

/// Number of bytes `write_varint2` produces for `value`.
pub fn size_varint2(value: u64) -> usize {
    let mut n = value;
    let mut size = 1;
    while n > 0x7f {
        n = (n >> 7) - 1;
        size += 1;
    }
    size
}

/// Decode a native integer starting at `offset`.
///
/// Returns the value and the offset just past the terminating byte.
pub fn read_varint2(src: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut n: u64 = 0;
    let mut pos = offset;

    loop {
        let b = next_byte(src, pos)?;
        pos += 1;

        n = n
            .checked_mul(0x80)
            .map(|v| v | u64::from(b & 0x7f))
            .ok_or_else(|| native_overflow(offset))?;
        if b & 0x80 == 0 {
            return Ok((n, pos));
        }
        n = n.checked_add(1).ok_or_else(|| native_overflow(offset))?;
    }
}

/// Encode an integer of any size. Matches `write_varint2` wherever both apply.
pub fn write_varint2_big(value: &BigUint) -> Vec<u8> {
    let mut out = Vec::new();
    let mut n = value.clone();
    let last_group = BigUint::from(0x7fu32);

    loop {
        let flag = if out.is_empty() { 0x00 } else { 0x80 };
        out.push(low_group(&n) | flag);
        if n <= last_group {
            break;
        }
        n = (n >> 7u32) - 1u32;
    }

    out.reverse();
    out
}

/// Decode an integer of any size starting at `offset`.
pub fn read_varint2_big(src: &[u8], offset: usize) -> Result<(BigUint, usize)> {
    let mut n = BigUint::default();
    let mut pos = offset;

    loop {
        let b = next_byte(src, pos)?;
        pos += 1;

        n <<= 7u32;
        n += u32::from(b & 0x7f);
        if b & 0x80 == 0 {
            return Ok((n, pos));
        }
        n += 1u32;
    }
}

fn next_byte(src: &[u8], pos: usize) -> Result<u8> {
    src.get(pos).copied().ok_or_else(|| {
        PrimitivesError::Encoding(format!(
            "Out of bounds read: varint truncated at offset {pos}"
        ))
    })
}

fn low_group(n: &BigUint) -> u8 {
    n.to_u32_digits()
        .first()
        .map_or(0, |digit| (digit & 0x7f) as u8)
}

fn native_overflow(offset: usize) -> PrimitivesError {
    PrimitivesError::Range(format!(
        "Varint at offset {offset} exceeds a 64-bit integer"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const VECTORS: &[(u64, &[u8])] = &[
        (0, &[0x00]),
        (1, &[0x01]),
        (127, &[0x7f]),
        (128, &[0x80, 0x00]),
        (255, &[0x80, 0x7f]),
        (16383, &[0xfe, 0x7f]),
        (16384, &[0xff, 0x00]),
        (16511, &[0xff, 0x7f]),
        (65535, &[0x82, 0xfe, 0x7f]),
        (1 << 32, &[0x8e, 0xfe, 0xfe, 0xff, 0x00]),
    ];

    #[test]
    fn test_known_vectors() {
        for (value, bytes) in VECTORS {
            assert_eq!(write_varint2(*value), bytes.to_vec(), "writing {value}");
            assert_eq!(
                read_varint2(bytes, 0).unwrap(),
                (*value, bytes.len()),
                "reading {value}"
            );
            assert_eq!(size_varint2(*value), bytes.len());
        }
    }

    #[test]
    fn test_known_vectors_wide() {
        for (value, bytes) in VECTORS {
            let big = BigUint::from(*value);
            assert_eq!(write_varint2_big(&big), bytes.to_vec());
            assert_eq!(read_varint2_big(bytes, 0).unwrap(), (big, bytes.len()));
        }
    }

    #[test]
    fn test_u64_max() {
        let encoded = write_varint2(u64::MAX);
        assert_eq!(encoded.len(), size_varint2(u64::MAX));
        assert!(encoded.len() <= MAX_NATIVE_LEN);
        assert_eq!(read_varint2(&encoded, 0).unwrap().0, u64::MAX);
        assert_eq!(write_varint2_big(&BigUint::from(u64::MAX)), encoded);
    }

    #[test]
    fn test_native_overflow() {
        let too_big = BigUint::from(u64::MAX) + 1u32;
        let encoded = write_varint2_big(&too_big);
        assert!(read_varint2(&encoded, 0).unwrap_err().is_range());
        assert_eq!(read_varint2_big(&encoded, 0).unwrap().0, too_big);
    }

    #[test]
    fn test_wide_values() {
        let value = (BigUint::from(1u32) << 300u32) + 12345u32;
        let encoded = write_varint2_big(&value);
        assert_eq!(read_varint2_big(&encoded, 0).unwrap(), (value, encoded.len()));
    }

    #[test]
    fn test_truncated_input() {
        assert!(read_varint2(&[], 0).unwrap_err().is_encoding());
        assert!(read_varint2(&[0x80], 0).unwrap_err().is_encoding());
        assert!(read_varint2(&[0xff, 0xff], 0).unwrap_err().is_encoding());
        assert!(read_varint2(&[0x00], 1).unwrap_err().is_encoding());
        assert!(read_varint2_big(&[0x8e, 0xfe], 0).unwrap_err().is_encoding());
    }

    #[test]
    fn test_read_at_offset() {
        let buf = [0xaa, 0x80, 0x00, 0x7f];
        assert_eq!(read_varint2(&buf, 1).unwrap(), (128, 3));
        assert_eq!(read_varint2(&buf, 3).unwrap(), (127, 4));
    }

    #[test]
    fn test_write_into() {
        let mut buf = [0u8; 6];
        let end = write_varint2_into(&mut buf, 1, 1 << 32).unwrap();
        assert_eq!(end, 6);
        assert_eq!(buf, [0x00, 0x8e, 0xfe, 0xfe, 0xff, 0x00]);

        let mut small = [0u8; 2];
        assert!(write_varint2_into(&mut small, 1, 128)
            .unwrap_err()
            .is_encoding());
        assert_eq!(small, [0, 0]);
        assert!(write_varint2_into(&mut small, usize::MAX, 0)
            .unwrap_err()
            .is_encoding());
    }

    #[test]
    fn test_native_and_wide_agree() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            let value: u64 = rng.gen::<u64>() >> rng.gen_range(0..64);
            let native = write_varint2(value);
            assert_eq!(native, write_varint2_big(&BigUint::from(value)));
            assert_eq!(read_varint2(&native, 0).unwrap(), (value, native.len()));
        }
    }
}

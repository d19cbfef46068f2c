//! CompactSize: the length prefix used on the Bitcoin wire.
//!
//! 0–252: 1 byte; 253–0xFFFF: 0xFD + 2B LE; up to 0xFFFFFFFF: 0xFE + 4B LE;
//! else 0xFF + 8B LE. Only the shortest form is accepted when reading.

use crate::error::{PrimitivesError, Result};

/// Append the CompactSize encoding of `n` to `buf`.
pub fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(0xfd);
        buf.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(0xfe);
        buf.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        buf.push(0xff);
        buf.extend_from_slice(&n.to_le_bytes());
    }
}

pub fn size_compact_size(n: u64) -> usize {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Decode a CompactSize at `offset`, returning the value and the next offset.
pub fn read_compact_size(src: &[u8], offset: usize) -> Result<(u64, usize)> {
    let prefix = *src.get(offset).ok_or_else(|| out_of_bounds(offset, 1, src.len()))?;
    let body = offset + 1;

    let (value, width, min) = match prefix {
        0xfd => (u64::from(u16::from_le_bytes(take(src, body)?)), 2, 0xfd),
        0xfe => (u64::from(u32::from_le_bytes(take(src, body)?)), 4, 0x1_0000),
        0xff => (u64::from_le_bytes(take(src, body)?), 8, 0x1_0000_0000),
        n => return Ok((u64::from(n), body)),
    };

    if value < min {
        return Err(PrimitivesError::Encoding(format!(
            "Non-canonical varint at offset {offset}"
        )));
    }
    Ok((value, body + width))
}

fn take<const N: usize>(src: &[u8], offset: usize) -> Result<[u8; N]> {
    offset
        .checked_add(N)
        .and_then(|end| src.get(offset..end))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| out_of_bounds(offset, N, src.len()))
}

fn out_of_bounds(offset: usize, len: usize, available: usize) -> PrimitivesError {
    PrimitivesError::Encoding(format!(
        "Out of bounds read: {len} bytes at offset {offset} from {available} byte buffer"
    ))
}

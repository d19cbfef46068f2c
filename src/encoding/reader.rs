//! Read cursor over a borrowed byte buffer
//!
//! Each read decodes one field with the matching codec and moves past it.

use crate::encoding::{compact_size, fixed64, varint};
use crate::error::{PrimitivesError, Result};
use num_bigint::{BigInt, BigUint};

/// Cursor over a borrowed buffer. The offset only advances on success.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> ByteReader<'a> {
        ByteReader { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                PrimitivesError::Encoding(format!(
                    "Out of bounds read: {len} bytes at offset {} with {} remaining",
                    self.offset,
                    self.remaining()
                ))
            })?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let value = fixed64::read_u64(self.data, self.offset)?;
        self.offset += 8;
        Ok(value)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let value = fixed64::read_i64(self.data, self.offset)?;
        self.offset += 8;
        Ok(value)
    }

    pub fn read_u64_wide(&mut self) -> Result<BigInt> {
        let value = fixed64::read_u64_wide(self.data, self.offset)?;
        self.offset += 8;
        Ok(value)
    }

    pub fn read_i64_wide(&mut self) -> Result<BigInt> {
        let value = fixed64::read_i64_wide(self.data, self.offset)?;
        self.offset += 8;
        Ok(value)
    }

    pub fn read_varint2(&mut self) -> Result<u64> {
        let (value, next) = varint::read_varint2(self.data, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    pub fn read_varint2_big(&mut self) -> Result<BigUint> {
        let (value, next) = varint::read_varint2_big(self.data, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    pub fn read_compact_size(&mut self) -> Result<u64> {
        let (value, next) = compact_size::read_compact_size(self.data, self.offset)?;
        self.offset = next;
        Ok(value)
    }

    /// Read a CompactSize length prefix followed by that many bytes.
    pub fn read_var_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.offset;
        let len = self.read_compact_size()?;
        let len = usize::try_from(len)
            .ok()
            .filter(|len| *len <= self.remaining());
        match len {
            Some(len) => self.read_bytes(len),
            None => {
                self.offset = start;
                Err(PrimitivesError::Encoding(format!(
                    "Out of bounds read: var bytes at offset {start} exceed buffer"
                )))
            }
        }
    }
}

//! Append-only byte buffer for building wire records

use crate::encoding::{compact_size, fixed64, varint};
use crate::error::Result;
use num_bigint::{BigInt, BigUint};

/// Growable output buffer. A failed write leaves the contents unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> ByteWriter {
        ByteWriter::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.data.push(value);
        self
    }

    pub fn write_u64(&mut self, value: i64) -> Result<&mut Self> {
        self.write_fixed(|buf| fixed64::write_u64(buf, 0, value))
    }

    pub fn write_i64(&mut self, value: i64) -> Result<&mut Self> {
        self.write_fixed(|buf| fixed64::write_i64(buf, 0, value))
    }

    pub fn write_u64_wide(&mut self, value: &BigInt) -> Result<&mut Self> {
        self.write_fixed(|buf| fixed64::write_u64_wide(buf, 0, value))
    }

    pub fn write_i64_wide(&mut self, value: &BigInt) -> Result<&mut Self> {
        self.write_fixed(|buf| fixed64::write_i64_wide(buf, 0, value))
    }

    pub fn write_varint2(&mut self, value: u64) -> &mut Self {
        self.data.extend(varint::write_varint2(value));
        self
    }

    pub fn write_varint2_big(&mut self, value: &BigUint) -> &mut Self {
        self.data.extend(varint::write_varint2_big(value));
        self
    }

    pub fn write_compact_size(&mut self, value: u64) -> &mut Self {
        compact_size::write_compact_size(&mut self.data, value);
        self
    }

    /// Write a CompactSize length prefix followed by `bytes`.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_compact_size(bytes.len() as u64).write_bytes(bytes)
    }

    fn write_fixed<F>(&mut self, encode: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut [u8]) -> Result<usize>,
    {
        let mut buf = [0u8; 8];
        encode(&mut buf)?;
        self.data.extend_from_slice(&buf);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::ByteReader;

    #[test]
    fn test_writer_reader_agree() {
        let mut writer = ByteWriter::new();
        writer
            .write_u8(7)
            .write_varint2(16384)
            .write_var_bytes(b"abc")
            .write_compact_size(300);
        writer.write_i64(-546).unwrap().write_u64(546).unwrap();
        writer
            .write_u64_wide(&BigInt::from(u64::MAX))
            .unwrap()
            .write_varint2_big(&(BigUint::from(1u32) << 70u32));

        let bytes = writer.into_inner();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert_eq!(reader.read_varint2().unwrap(), 16384);
        assert_eq!(reader.read_var_bytes().unwrap(), b"abc");
        assert_eq!(reader.read_compact_size().unwrap(), 300);
        assert_eq!(reader.read_i64().unwrap(), -546);
        assert_eq!(reader.read_u64().unwrap(), 546);
        assert_eq!(reader.read_u64_wide().unwrap(), BigInt::from(u64::MAX));
        assert_eq!(
            reader.read_varint2_big().unwrap(),
            BigUint::from(1u32) << 70u32
        );
        assert!(reader.is_empty());
    }

    #[test]
    fn test_failed_write_leaves_buffer() {
        let mut writer = ByteWriter::new();
        writer.write_u8(1);
        assert!(writer.write_u64(i64::MAX).unwrap_err().is_range());
        assert!(writer
            .write_i64_wide(&BigInt::from(u64::MAX))
            .unwrap_err()
            .is_range());
        assert_eq!(writer.as_bytes(), &[1]);
        assert_eq!(writer.len(), 1);
    }
}

//! Wire and text encodings
//!
//! Base58 text, VarInt-2 and CompactSize variable-length integers, fixed
//! 64-bit little-endian integers, plus cursor types built on top of them.

pub mod base58;
pub mod compact_size;
pub mod fixed64;
pub mod reader;
pub mod varint;
pub mod writer;

pub use base58::{Alphabet, Base58};
pub use reader::ByteReader;
pub use varint::{read_varint2, size_varint2, write_varint2};
pub use writer::ByteWriter;

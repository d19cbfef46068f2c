//! # Architect Primitives - The Encoding and Consensus Arithmetic Layer
//!
//! These are the primitives everything else in my node sits on. If one bit is
//! wrong here, blocks stop parsing or consensus forks, so every function is
//! pure and tested against known vectors.
//!
//! ## What Lives Here
//! - **Big Integers**: thin helpers over `num-bigint` (hex parsing, fixed-width bytes)
//! - **Base58**: address text encoding with leading-zero preservation
//! - **VarInt-2**: the biased 7-bit varint used by my storage formats
//! - **CompactSize**: Bitcoin's length-prefix varint
//! - **Fixed64**: 8-byte little-endian integers, checked and wide flavours
//! - **Amounts**: exact decimal strings for base-unit amounts
//! - **Proof of Work**: compact "bits" targets and hash verification
//!
//! ## How I Organized My Code
//! - `core/`: consensus arithmetic (bignum, amount, proof_of_work)
//! - `encoding/`: byte and text codecs plus reader/writer cursors
//! - `config/`: network parameters and TOML/env configuration
//! - `error/`: one error enum for the whole crate
//! - `cli/`: command-line interface for poking at the codecs
//!
//! ## Rules I Stick To
//! - No global mutable state; network parameters are passed in
//! - Writers validate before touching the output buffer
//! - Proof-of-work verification answers `false`, it never errors

pub mod cli;
pub mod config;
pub mod core;
pub mod encoding;
pub mod error;

// Re-export commonly used types for convenience
pub use crate::cli::{Command, Opt};
pub use crate::config::{Config, Network, NetworkParams, Settings, GLOBAL_CONFIG};
pub use crate::core::{
    from_decimal_string, to_decimal_string, BigNumExt, Endian, ProofOfWork, Unit,
    MAX_SAFE_VALUE,
};
pub use crate::encoding::{base58, fixed64, Alphabet, Base58, ByteReader, ByteWriter};
pub use crate::error::{PrimitivesError, Result};

//! Base58 text encoding
//!
//! Thin layer over the `bs58` crate. Every leading zero byte is kept as a
//! leading copy of the alphabet's first symbol (`'1'` for the Bitcoin alphabet).

use crate::error::{PrimitivesError, Result};
use std::fmt;

const BITCOIN_SYMBOLS: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// A 58-symbol alphabet, prepared for `bs58`
#[derive(Clone, Copy)]
pub struct Alphabet {
    symbols: [u8; 58],
    inner: bs58::Alphabet,
}

impl Alphabet {
    /// The alphabet used by Bitcoin addresses
    pub const BITCOIN: Alphabet = Alphabet::new(BITCOIN_SYMBOLS);

    /// Build an alphabet at compile time; bad symbols abort const evaluation.
    pub const fn new(symbols: &[u8; 58]) -> Alphabet {
        Alphabet {
            symbols: *symbols,
            inner: bs58::Alphabet::new_unwrap(symbols),
        }
    }

    /// Build an alphabet from runtime input.
    pub fn try_new(symbols: &[u8]) -> Result<Alphabet> {
        let symbols: &[u8; 58] = symbols.try_into().map_err(|_| {
            PrimitivesError::Encoding(format!(
                "Base58 alphabet needs 58 symbols, got {}",
                symbols.len()
            ))
        })?;
        let inner = bs58::Alphabet::new(symbols)
            .map_err(|e| PrimitivesError::Encoding(format!("Invalid base58 alphabet: {e}")))?;

        Ok(Alphabet {
            symbols: *symbols,
            inner,
        })
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::BITCOIN
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

/// Base58 codec bound to one alphabet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Base58 {
    alphabet: Alphabet,
}

impl Base58 {
    pub fn new(alphabet: Alphabet) -> Base58 {
        Base58 { alphabet }
    }

    pub fn encode(&self, bytes: &[u8]) -> String {
        encode_with(bytes, &self.alphabet)
    }

    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        decode_with(text, &self.alphabet)
    }
}

/// Encode bytes with the Bitcoin alphabet.
///
/// ```
/// use architect_primitives::encoding::base58;
/// assert_eq!(base58::encode(b"hello world"), "StV1DL6CwTryKyV");
/// assert_eq!(base58::encode(&[0, 0, 1]), "112");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    encode_with(bytes, &Alphabet::BITCOIN)
}

/// Decode a string in the Bitcoin alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    decode_with(text, &Alphabet::BITCOIN)
}

pub fn encode_with(bytes: &[u8], alphabet: &Alphabet) -> String {
    bs58::encode(bytes)
        .with_alphabet(&alphabet.inner)
        .into_string()
}

pub fn decode_with(text: &str, alphabet: &Alphabet) -> Result<Vec<u8>> {
    bs58::decode(text)
        .with_alphabet(&alphabet.inner)
        .into_vec()
        .map_err(|e| match e {
            bs58::decode::Error::InvalidCharacter { character, index } => {
                PrimitivesError::Encoding(format!(
                    "Invalid base58 character {character:?} at position {index}"
                ))
            }
            bs58::decode::Error::NonAsciiCharacter { index } => PrimitivesError::Encoding(
                format!("Non-ASCII base58 character at position {index}"),
            ),
            other => PrimitivesError::Encoding(format!("Invalid base58 string {text:?}: {other}")),
        })
}

//! Error handling for the primitives layer
//!
//! Every codec and converter reports failures through `PrimitivesError`.
//! Proof-of-work verification is the exception: it answers with a plain `bool`.

use std::fmt;

/// Result type alias for primitive operations
pub type Result<T> = std::result::Result<T, PrimitivesError>;

/// Error taxonomy shared by all codecs and converters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitivesError {
    /// Malformed codec input, out-of-alphabet symbol or truncated buffer
    Encoding(String),
    /// Value does not fit the requested numeric representation
    Range(String),
    /// Malformed or out-of-range decimal amount string
    Value(String),
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(String),
}

impl PrimitivesError {
    pub fn is_encoding(&self) -> bool {
        matches!(self, PrimitivesError::Encoding(_))
    }

    pub fn is_range(&self) -> bool {
        matches!(self, PrimitivesError::Range(_))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, PrimitivesError::Value(_))
    }
}

impl fmt::Display for PrimitivesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitivesError::Encoding(msg) => write!(f, "Encoding error: {msg}"),
            PrimitivesError::Range(msg) => write!(f, "Range error: {msg}"),
            PrimitivesError::Value(msg) => write!(f, "Value error: {msg}"),
            PrimitivesError::Config(msg) => write!(f, "Configuration error: {msg}"),
            PrimitivesError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for PrimitivesError {}

impl From<std::io::Error> for PrimitivesError {
    fn from(err: std::io::Error) -> Self {
        PrimitivesError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for PrimitivesError {
    fn from(err: toml::de::Error) -> Self {
        PrimitivesError::Config(err.to_string())
    }
}

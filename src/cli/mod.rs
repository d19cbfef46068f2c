//! Command-line interface
//!
//! This module contains the CLI commands and argument parsing
//! for inspecting the codecs and proof-of-work checks.

pub mod commands;

pub use commands::{parse_bits, Command, Opt};

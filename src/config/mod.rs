//! Configuration management
//!
//! Network consensus parameters (the proof-of-work limit) and the TOML /
//! environment configuration the CLI resolves them from.
//!
//! Library functions never read `GLOBAL_CONFIG`; callers pass parameters in.

pub mod settings;

pub use settings::{Config, Network, NetworkParams, Settings, GLOBAL_CONFIG};

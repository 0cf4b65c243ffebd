//! Configuration management for omafed.
//!
//! Defaults, the TOML config file and command-line flags are merged into one
//! process-wide key/value store, in that order of precedence.

mod config;

pub use config::*;

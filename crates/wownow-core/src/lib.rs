//! # wownow-core
//!
//! Core configuration and utilities for the WowNow local vault.
//!
//! - **Configuration**: Loading, validation, and persistence of the JSON5 config file
//! - **Utilities**: Path resolution, environment handling, and zeroizing strings

pub mod config;
pub mod error;
pub mod paths;
pub mod env;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::ConfigError;
pub use secret::SecretString;

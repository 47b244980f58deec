//! Sea-Seq Common - Shared utilities: configuration and logging
//!
//! This crate provides common functionality used across all Sea-Seq crates.

pub mod config;
pub mod logging;

pub use config::{ChecksConfig, Config, ConfigBuilder, LoggingConfig, RemoteConfig};
pub use logging::{init_logging_with_config, LogConfig, LogFormat};

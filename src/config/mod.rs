// src/config/mod.rs
//! Configuration management for the fleet monitor
//!
//! This module handles all configuration-related functionality including:
//! - Loading and parsing configuration files
//! - Generating configuration templates
//! - Mapping configured ranges onto scan requests
//!
//! The configuration uses TOML format; parsing itself is delegated
//! entirely to serde, the monitor only consumes the resulting structure.

/// Core configuration implementation
///
/// Contains the [`Config`] struct and related types that define the
/// monitor's configuration structure and behavior.
pub mod config;

// Re-export key items for easy access
pub use config::{Config, GroupConfig, RangeConfig};

use crate::utils::error::MonitorError;
use std::path::PathBuf;

/// Loads monitor configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the configuration file (anything convertible to PathBuf)
///
/// # Returns
/// * `Ok(Config)` - Successfully loaded configuration
/// * `Err(MonitorError)` - If the file couldn't be read or parsed
pub fn load(path: impl Into<PathBuf>) -> Result<Config, MonitorError> {
    Config::load(path)
}

/// Generates a commented configuration template
///
/// # Arguments
/// * `notify` - Whether to include the report distribution section
///
/// # Returns
/// String containing a ready-to-use TOML configuration template
pub fn generate_template(notify: bool) -> String {
    Config::generate_template(notify)
}

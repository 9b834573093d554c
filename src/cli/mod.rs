// src/cli/mod.rs
//! Command-line interface definitions
//!
//! Declares the monitor's subcommands and their options, parsed with
//! clap's derive API.

/// Subcommand and option structs
pub mod commands;

// Re-export for easier access
pub use commands::{Action, Commands, ConfigOptions, ProbeOptions, ScanOptions};

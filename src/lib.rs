//! Rig Monitor - Mining fleet scanning and reporting in Rust
//!
//! This crate polls a fleet of mining-rig controllers over their TCP/JSON
//! status API and turns the answers into reports:
//! - Per-host probing with fault classification (one record per address)
//! - Bounded-concurrency IP-range scanning
//! - Per-group and fleet-wide hash-rate/status aggregation
//! - Table and CSV report rendering with a mail-shaped distribution envelope
//!
//! Everything is recomputed fresh per run; no scan state survives between
//! invocations.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Network communication with the monitored devices
pub mod network;

/// Fleet scanning: per-host probing and range scans
pub mod scanner;

/// Statistics aggregation across groups
pub mod stats;

/// Report rendering (tables and CSV)
pub mod report;

/// Report distribution envelope and delivery seam
pub mod notify;

/// Utility functions and error handling
pub mod utils;

/// Command-line interface definitions
pub mod cli;

/// Configuration management
pub mod config;

/// Shared type definitions
pub mod types;

// Core exports
pub use cli::Commands;
pub use config::Config;
pub use network::{DEFAULT_API_PORT, DeviceClient};
pub use notify::{LogNotifier, Notification, Notifier};
pub use report::Renderer;
pub use scanner::{Prober, ScanRequest, Scanner};
pub use stats::{FleetSummary, GroupStats, summarize};
pub use types::{HostRecord, HostStatus};
pub use utils::{MonitorError, init_logging};

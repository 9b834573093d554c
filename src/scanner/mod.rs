// src/scanner/mod.rs
//! Fleet scanning components
//!
//! This module drives the per-host and per-range scanning pipeline:
//! - `Prober`: reduces a device's two status queries to one record
//! - `Scanner`: validates a range request and fans probes out over it
//!
//! Control flow: `Scanner` drives `Prober` drives
//! [`DeviceClient`](crate::network::DeviceClient), one record per
//! retained address.

/// Per-host probe implementation
///
/// Swallows every transport and protocol fault and converts it into
/// host status data, isolating each device's failure from its siblings.
pub mod prober;

/// IP-range scan implementation
///
/// Request validation, address enumeration with exclusions, bounded
/// concurrent probing, and deterministic result ordering.
pub mod range;

// Re-export main components for cleaner imports
pub use prober::Prober;
pub use range::{CONCURRENCY_CEILING, ScanRequest, Scanner};

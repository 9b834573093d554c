//! Statistics aggregation module
//!
//! This module turns the per-host records produced by repeated range
//! scans into per-group and fleet-wide tallies:
//! - alive / dead / connection-refused counts
//! - summed hash rate of the running hosts
//!
//! Aggregation is a pure function of its input and is recomputed fresh
//! on every run; nothing is persisted between runs.

/// Submodule containing the aggregation implementation
///
/// Contains [`GroupStats`], [`FleetSummary`] and the [`summarize`]
/// entry point the reporting layer consumes.
pub mod aggregate;

// Re-export main components
pub use aggregate::{FleetSummary, GroupStats, summarize};

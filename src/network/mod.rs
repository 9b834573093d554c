// src/network/mod.rs
//! Network communication components
//!
//! This module handles all network interaction with the monitored rigs.
//! It provides one client implementation:
//! - `DeviceClient`: one-shot TCP/JSON queries against a rig's status API

/// Device status API client implementation
///
/// Handles the proprietary TCP/JSON status protocol: single command per
/// connection, response framed by the peer closing the stream.
pub mod device;

// Re-export main components for cleaner imports
pub use device::{DEFAULT_API_PORT, DeviceClient};

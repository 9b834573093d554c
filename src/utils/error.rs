// src/utils/error.rs
use std::io;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Main error type for the fleet monitor
///
/// This enum represents all possible error conditions that can occur
/// while scanning a fleet, including the closed set of per-host
/// transport faults, protocol errors, and configuration errors.
///
/// The transport fault variants (`ConnectionRefused`, `HostUnreachable`,
/// `Timeout`) are never surfaced past the host prober — they are
/// converted into [`HostStatus`](crate::types::HostStatus) data so a
/// single misbehaving device cannot abort the scan of its siblings.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Malformed scan request parameters (fatal to that request only)
    #[error("Invalid scan request: {0}")]
    ValidationError(String),

    /// Device actively refused the TCP connection
    #[error("Connection refused by {0}")]
    ConnectionRefused(Ipv4Addr),

    /// Network path to the device is unreachable
    #[error("Host {0} is unreachable")]
    HostUnreachable(Ipv4Addr),

    /// Device did not answer within the configured timeout
    #[error("No response from {0} within the configured timeout")]
    Timeout(Ipv4Addr),

    /// Device response was not valid JSON or had an unexpected shape
    #[error("Protocol violation: {0}")]
    ProtocolError(String),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration file or parameter errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Misuse of the notification attachment boundary (fatal to the run)
    #[error("Invalid attachment: {0}")]
    AttachmentError(String),

    /// Async task execution errors
    #[error("Task execution error: {0}")]
    TaskError(String),
}

/// Converts async task join errors into MonitorError
///
/// Used when a spawned probe task fails unexpectedly. Wraps the
/// original error in a `TaskError` variant with context.
impl From<tokio::task::JoinError> for MonitorError {
    fn from(e: tokio::task::JoinError) -> Self {
        MonitorError::TaskError(format!("Async task failed: {}", e))
    }
}

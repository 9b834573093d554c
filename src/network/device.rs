// src/network/device.rs

//! Device status API client
//!
//! Implements the TCP/JSON status protocol spoken by mining-rig
//! controllers: one connection per query, a single JSON command object,
//! and a response that is terminated by the peer closing the stream.
use crate::utils::error::MonitorError;
use serde_json::{Value, json};
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// TCP port the device status API listens on by default
pub const DEFAULT_API_PORT: u16 = 4028;

/// Client for the device status API
///
/// Opens a fresh TCP connection for every query (the protocol has no
/// connection reuse), sends one JSON command, and reads the response
/// until the device closes the stream. The wire format has no length
/// framing — end-of-response is signaled by connection close, which is
/// fixed by device firmware the monitor does not control.
///
/// No retry logic lives at this layer; callers decide whether to retry.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    /// TCP port the devices listen on
    port: u16,
    /// Bound applied separately to the connect, write, and read phases
    timeout: Duration,
}

impl DeviceClient {
    /// Creates a new DeviceClient
    ///
    /// # Arguments
    /// * `port` - TCP port the devices listen on
    /// * `timeout` - Bound for each socket phase of a query
    pub fn new(port: u16, timeout: Duration) -> Self {
        DeviceClient { port, timeout }
    }

    /// Sends one command to a device and returns its parsed response
    ///
    /// # Arguments
    /// * `ip` - Address of the device
    /// * `command` - Protocol command name (e.g. "summary", "pools")
    /// * `parameter` - Optional command parameter
    ///
    /// # Errors
    /// Returns `MonitorError` with one of the closed transport fault
    /// kinds when the device cannot be reached:
    /// - `ConnectionRefused` - peer actively refused the connection
    /// - `HostUnreachable` - no network path to the device
    /// - `Timeout` - a socket phase exceeded the configured bound
    /// - `ProtocolError` - the response was not valid JSON
    pub async fn query(
        &self,
        ip: Ipv4Addr,
        command: &str,
        parameter: Option<&str>,
    ) -> Result<Value, MonitorError> {
        let request = match parameter {
            Some(parameter) => json!({ "command": command, "parameter": parameter }),
            None => json!({ "command": command }),
        };

        let addr = SocketAddr::from((ip, self.port));
        let mut stream = timeout(self.timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| MonitorError::Timeout(ip))?
            .map_err(|e| classify_io(ip, e))?;

        timeout(self.timeout, stream.write_all(request.to_string().as_bytes()))
            .await
            .map_err(|_| MonitorError::Timeout(ip))?
            .map_err(|e| classify_io(ip, e))?;

        let mut raw = Vec::new();
        timeout(self.timeout, stream.read_to_end(&mut raw))
            .await
            .map_err(|_| MonitorError::Timeout(ip))?
            .map_err(|e| classify_io(ip, e))?;

        // Device firmware terminates the payload with a NUL byte.
        while raw.last() == Some(&0) {
            raw.pop();
        }

        serde_json::from_slice(&raw).map_err(|e| {
            MonitorError::ProtocolError(format!("Invalid JSON from {}: {}", ip, e))
        })
    }
}

/// Maps socket errors onto the closed set of transport fault kinds
///
/// Anything outside the closed set is passed through as an I/O error,
/// which the prober classifies as `Unknown`.
fn classify_io(ip: Ipv4Addr, e: io::Error) -> MonitorError {
    match e.kind() {
        io::ErrorKind::ConnectionRefused => MonitorError::ConnectionRefused(ip),
        io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
            MonitorError::HostUnreachable(ip)
        }
        _ => MonitorError::IoError(e),
    }
}

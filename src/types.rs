// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Placeholder used for pool fields when a device reports no value
pub const NO_VALUE: &str = "-";

/// Health classification of a single queried device
///
/// Every probed address ends up in exactly one of these buckets.
/// Transport-layer faults and protocol-layer faults stay distinguishable
/// here even though summary reporting folds `Down` and `Unknown` together.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostStatus {
    /// Device answered both status queries with well-formed data
    Running,

    /// Network path to the device is unreachable (host or network level)
    Down,

    /// Device actively refused the TCP connection
    ///
    /// Usually means the host is up but the mining process is not
    /// listening on the API port.
    ConnectionRefused,

    /// Device misbehaved in a way the monitor could not classify
    ///
    /// Covers query timeouts, malformed or misshapen JSON responses,
    /// and probes abandoned when the scan deadline elapsed.
    Unknown,
}

impl fmt::Display for HostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostStatus::Running => write!(f, "Running"),
            HostStatus::Down => write!(f, "Down"),
            HostStatus::ConnectionRefused => write!(f, "Connection refused"),
            HostStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result of probing one device address during a scan
///
/// Immutable once produced; a scan yields exactly one record per
/// non-excluded address in its range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Address the device was queried at
    pub ip: Ipv4Addr,
    /// Health classification of the device
    pub status: HostStatus,
    /// Average hash rate in MH/s (0.0 unless the device is Running)
    pub hash_rate: f64,
    /// URL of the active stratum pool ("-" if none)
    pub pool_url: String,
    /// Account or worker identifier on the active pool ("-" if none)
    pub pool_user: String,
}

impl HostRecord {
    /// Builds a record for a device that answered both queries
    ///
    /// # Arguments
    /// * `ip` - Address the device was queried at
    /// * `hash_rate` - Average hash rate reported by the device, in MH/s
    /// * `pool_url` - URL of the active stratum pool
    /// * `pool_user` - Account identifier on the active pool
    pub fn running(ip: Ipv4Addr, hash_rate: f64, pool_url: String, pool_user: String) -> Self {
        HostRecord {
            ip,
            status: HostStatus::Running,
            hash_rate,
            pool_url,
            pool_user,
        }
    }

    /// Builds a record for a device whose probe failed
    ///
    /// Fault records carry a zero hash rate and placeholder pool fields.
    pub fn fault(ip: Ipv4Addr, status: HostStatus) -> Self {
        HostRecord {
            ip,
            status,
            hash_rate: 0.0,
            pool_url: NO_VALUE.to_string(),
            pool_user: NO_VALUE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_strings() {
        assert_eq!(HostStatus::Running.to_string(), "Running");
        assert_eq!(HostStatus::ConnectionRefused.to_string(), "Connection refused");
        assert_eq!(HostStatus::Down.to_string(), "Down");
        assert_eq!(HostStatus::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_fault_record_is_zeroed() {
        let record = HostRecord::fault(Ipv4Addr::new(10, 0, 0, 7), HostStatus::Down);
        assert_eq!(record.status, HostStatus::Down);
        assert_eq!(record.hash_rate, 0.0);
        assert_eq!(record.pool_url, NO_VALUE);
        assert_eq!(record.pool_user, NO_VALUE);
    }
}

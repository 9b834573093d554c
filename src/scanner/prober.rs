// src/scanner/prober.rs

//! Per-host probe implementation
//!
//! Reduces the two status queries a rig answers (`summary` and `pools`)
//! into one [`HostRecord`]. Every transport or protocol fault is
//! swallowed here and converted into status data, so one misbehaving
//! device can never abort the scan of the rest of the fleet.
use crate::network::device::DeviceClient;
use crate::types::{HostRecord, HostStatus, NO_VALUE};
use crate::utils::error::MonitorError;
use serde_json::Value;
use std::net::Ipv4Addr;

/// Best-effort prober for a single device
///
/// `probe` is infallible by design: the scanning pipeline consumes its
/// output as data, and fault classification replaces error propagation
/// at this boundary.
#[derive(Debug, Clone)]
pub struct Prober {
    /// Client used for both status queries
    client: DeviceClient,
}

impl Prober {
    /// Creates a new Prober around the given device client
    pub fn new(client: DeviceClient) -> Self {
        Prober { client }
    }

    /// Probes one device and returns its record
    ///
    /// Queries `summary` for the average hash rate, then `pools` for the
    /// active stratum pool identity. Faults on either query classify the
    /// host instead of failing the call:
    /// - connection refused → `ConnectionRefused`
    /// - host/network unreachable → `Down`
    /// - anything else (timeout, bad JSON, unexpected shape) → `Unknown`
    pub async fn probe(&self, ip: Ipv4Addr) -> HostRecord {
        match self.fetch(ip).await {
            Ok(record) => record,
            Err(e) => {
                log::debug!("Probe of {} failed: {}", ip, e);
                HostRecord::fault(ip, classify_fault(&e))
            }
        }
    }

    /// Runs both queries and builds a Running record
    ///
    /// # Errors
    /// Returns `MonitorError` if either query fails or the `summary`
    /// response is missing its hash rate field.
    async fn fetch(&self, ip: Ipv4Addr) -> Result<HostRecord, MonitorError> {
        let summary = self.client.query(ip, "summary", None).await?;
        let hash_rate = average_hash_rate(&summary).ok_or_else(|| {
            MonitorError::ProtocolError(format!("Summary from {} is missing \"MHS av\"", ip))
        })?;

        let pools = self.client.query(ip, "pools", None).await?;
        let (pool_url, pool_user) = active_pool(&pools);

        Ok(HostRecord::running(ip, hash_rate, pool_url, pool_user))
    }
}

/// Maps a probe failure onto the host status recorded for it
fn classify_fault(e: &MonitorError) -> HostStatus {
    match e {
        MonitorError::ConnectionRefused(_) => HostStatus::ConnectionRefused,
        MonitorError::HostUnreachable(_) => HostStatus::Down,
        _ => HostStatus::Unknown,
    }
}

/// Extracts the first summary entry's average hash rate (MH/s)
fn average_hash_rate(summary: &Value) -> Option<f64> {
    summary.get("SUMMARY")?.as_array()?.first()?.get("MHS av")?.as_f64()
}

/// Finds the pool entry flagged as the active stratum connection
///
/// Returns its URL and account identifier, substituting "-" for absent
/// values or when no pool is currently active.
fn active_pool(pools: &Value) -> (String, String) {
    let entries = pools.get("POOLS").and_then(Value::as_array);
    if let Some(entries) = entries {
        for entry in entries {
            if entry.get("Stratum Active").and_then(Value::as_bool) == Some(true) {
                let url = entry
                    .get("URL")
                    .and_then(Value::as_str)
                    .unwrap_or(NO_VALUE)
                    .to_string();
                let user = entry
                    .get("User")
                    .and_then(Value::as_str)
                    .unwrap_or(NO_VALUE)
                    .to_string();
                return (url, user);
            }
        }
    }
    (NO_VALUE.to_string(), NO_VALUE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const LOCALHOST: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 1);

    /// Simulated rig that answers `summary` and `pools` until dropped.
    ///
    /// Each connection carries exactly one command, mirroring the real
    /// peer-close response framing.
    async fn spawn_rig(rate: f64, url: &'static str, user: &'static str) -> u16 {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            loop {
                let (mut stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                let mut buf = [0u8; 512];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let response = if request.contains("pools") {
                    json!({
                        "STATUS": [{"STATUS": "S", "Msg": "3 Pool(s)"}],
                        "POOLS": [
                            {"POOL": 0, "URL": "stratum+tcp://backup", "Status": "Alive",
                             "Stratum Active": false, "User": user},
                            {"POOL": 1, "URL": url, "Status": "Alive",
                             "Stratum Active": true, "User": user},
                        ],
                        "id": 1
                    })
                } else {
                    json!({
                        "STATUS": [{"STATUS": "S", "Msg": "Summary"}],
                        "SUMMARY": [{"Elapsed": 3600, "MHS av": rate, "Found Blocks": 0}],
                        "id": 1
                    })
                };
                let mut payload = response.to_string().into_bytes();
                payload.push(0); // firmware NUL terminator
                let _ = stream.write_all(&payload).await;
            }
        });
        port
    }

    fn prober(port: u16) -> Prober {
        Prober::new(DeviceClient::new(port, Duration::from_secs(2)))
    }

    #[tokio::test]
    async fn test_probe_running_device() {
        let port = spawn_rig(120.5, "stratum+tcp://x", "worker1").await;

        let record = prober(port).probe(LOCALHOST).await;
        assert_eq!(record.status, HostStatus::Running);
        assert_eq!(record.hash_rate, 120.5);
        assert_eq!(record.pool_url, "stratum+tcp://x");
        assert_eq!(record.pool_user, "worker1");
    }

    #[tokio::test]
    async fn test_probe_refused_device() {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let record = prober(port).probe(LOCALHOST).await;
        assert_eq!(record.status, HostStatus::ConnectionRefused);
        assert_eq!(record.hash_rate, 0.0);
        assert_eq!(record.pool_url, NO_VALUE);
    }

    #[tokio::test]
    async fn test_probe_misshapen_summary_is_unknown() {
        // Valid JSON, but no SUMMARY array to pull a hash rate from.
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 512];
            let _ = stream.read(&mut buf).await.unwrap();
            let _ = stream
                .write_all(br#"{"STATUS":[{"STATUS":"E","Msg":"Access denied"}],"id":1}"#)
                .await;
        });

        let record = prober(port).probe(LOCALHOST).await;
        assert_eq!(record.status, HostStatus::Unknown);
        assert_eq!(record.hash_rate, 0.0);
    }

    #[test]
    fn test_active_pool_picks_flagged_entry() {
        let pools = json!({
            "POOLS": [
                {"URL": "stratum+tcp://a", "Stratum Active": false, "User": "u1"},
                {"URL": "stratum+tcp://b", "Stratum Active": true, "User": "u2"},
            ]
        });
        assert_eq!(
            active_pool(&pools),
            ("stratum+tcp://b".to_string(), "u2".to_string())
        );
    }

    #[test]
    fn test_active_pool_substitutes_placeholders() {
        // Active entry with no URL/User fields, and no active entry at all.
        let partial = json!({"POOLS": [{"Stratum Active": true}]});
        assert_eq!(
            active_pool(&partial),
            (NO_VALUE.to_string(), NO_VALUE.to_string())
        );

        let idle = json!({"POOLS": [{"URL": "stratum+tcp://a", "Stratum Active": false}]});
        assert_eq!(
            active_pool(&idle),
            (NO_VALUE.to_string(), NO_VALUE.to_string())
        );
    }
}

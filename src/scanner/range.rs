// src/scanner/range.rs

//! IP-range scan implementation
//!
//! Validates a scan request, enumerates its addresses, fans the probes
//! out onto a bounded pool of tokio tasks, and reassembles the results
//! in ascending address order so output is deterministic regardless of
//! completion order.
use crate::scanner::prober::Prober;
use crate::types::{HostRecord, HostStatus};
use crate::utils::error::MonitorError;
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{Instant, timeout};

/// Ceiling applied to the default probe concurrency
///
/// Keeps an unconfigured wide scan from exhausting the monitoring
/// host's file descriptors or flooding the rig network. Explicit
/// configuration may exceed it.
pub const CONCURRENCY_CEILING: usize = 32;

/// One validated unit of scanning work: a /24-contained address range
///
/// Built from configuration, one per configured range per group.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// First address of the range
    pub start: Ipv4Addr,
    /// Number of consecutive addresses to scan (2..=254)
    pub range_size: u8,
    /// Addresses inside the range that must not be probed
    pub excluded: HashSet<Ipv4Addr>,
    /// Correction factor applied to non-zero hash rates
    ///
    /// Some hardware revisions misreport their internal rate by a known
    /// constant factor; the recorded value is `raw * multiplier`.
    pub multiplier: f64,
}

impl ScanRequest {
    /// Creates a request with no exclusions and a neutral multiplier
    pub fn new(start: Ipv4Addr, range_size: u8) -> Self {
        ScanRequest {
            start,
            range_size,
            excluded: HashSet::new(),
            multiplier: 1.0,
        }
    }

    /// Checks the range constraints, naming the violated one on failure
    ///
    /// # Errors
    /// Returns `ValidationError` when:
    /// - `range_size` is outside 2..=254
    /// - the start address's last octet is 0 or 255
    /// - the range would run past the .255 broadcast address
    pub fn validate(&self) -> Result<(), MonitorError> {
        let size = u16::from(self.range_size);
        if size <= 1 || size >= 255 {
            return Err(MonitorError::ValidationError(format!(
                "Range size {} is outside 2..=254",
                size
            )));
        }

        let last_octet = u16::from(self.start.octets()[3]);
        if last_octet == 0 || last_octet == 255 {
            return Err(MonitorError::ValidationError(format!(
                "Start address {} has reserved last octet {}",
                self.start, last_octet
            )));
        }

        if last_octet + size >= 256 {
            return Err(MonitorError::ValidationError(format!(
                "Range {} +{} runs past the end of the /24",
                self.start, size
            )));
        }

        Ok(())
    }

    /// Enumerates the addresses to probe, in ascending order
    ///
    /// Excluded addresses are skipped. Only meaningful on a validated
    /// request.
    pub fn addresses(&self) -> Vec<Ipv4Addr> {
        let base = u32::from(self.start);
        (0..u32::from(self.range_size))
            .map(|offset| Ipv4Addr::from(base + offset))
            .filter(|ip| !self.excluded.contains(ip))
            .collect()
    }
}

/// Scans an address range by probing every retained host
///
/// Probes are independent of each other, so they run concurrently on a
/// semaphore-bounded set of tasks. An optional whole-scan deadline
/// abandons in-flight probes and records their hosts as `Unknown`; the
/// scan still returns a full-length result set.
pub struct Scanner {
    /// Prober shared by all probe tasks
    prober: Arc<Prober>,
    /// Maximum number of in-flight probes
    concurrency: usize,
    /// Optional wall-clock bound for the whole scan
    deadline: Option<Duration>,
}

impl Scanner {
    /// Creates a new Scanner
    ///
    /// # Arguments
    /// * `prober` - Prober used for each retained address
    /// * `concurrency` - Probe parallelism, at least 1; defaults derived
    ///   from configuration stay under [`CONCURRENCY_CEILING`]
    pub fn new(prober: Prober, concurrency: usize) -> Self {
        Scanner {
            prober: Arc::new(prober),
            concurrency: concurrency.max(1),
            deadline: None,
        }
    }

    /// Sets a wall-clock deadline for each scan invocation
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Probes every retained address in the request's range
    ///
    /// Produces exactly one record per non-excluded address, sorted by
    /// address. Non-zero hash rates are corrected by the request's
    /// multiplier before recording.
    ///
    /// # Errors
    /// Returns `ValidationError` (and probes nothing) when the request
    /// violates a range constraint. Per-host faults never surface here;
    /// they are already folded into the records.
    pub async fn scan(&self, request: &ScanRequest) -> Result<Vec<HostRecord>, MonitorError> {
        request.validate()?;

        let addresses = request.addresses();
        log::info!(
            "Scanning {} hosts from {} ({} excluded)",
            addresses.len(),
            request.start,
            request.excluded.len()
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut pending = Vec::with_capacity(addresses.len());
        for ip in addresses {
            let prober = Arc::clone(&self.prober);
            let slots = Arc::clone(&semaphore);
            let handle = tokio::spawn(async move {
                let _permit = slots.acquire_owned().await.ok();
                prober.probe(ip).await
            });
            pending.push((ip, handle));
        }

        let cutoff = self.deadline.map(|d| Instant::now() + d);
        let mut records = Vec::with_capacity(pending.len());
        for (ip, mut handle) in pending {
            let joined = match cutoff {
                Some(cutoff) => {
                    let left = cutoff.saturating_duration_since(Instant::now());
                    match timeout(left, &mut handle).await {
                        Ok(joined) => joined,
                        Err(_) => {
                            handle.abort();
                            log::warn!("Scan deadline elapsed, abandoning probe of {}", ip);
                            records.push(HostRecord::fault(ip, HostStatus::Unknown));
                            continue;
                        }
                    }
                }
                None => handle.await,
            };

            let record = joined.unwrap_or_else(|e| {
                log::error!("Probe task for {} failed: {}", ip, e);
                HostRecord::fault(ip, HostStatus::Unknown)
            });
            records.push(apply_multiplier(record, request.multiplier));
        }

        records.sort_by_key(|record| record.ip);
        Ok(records)
    }
}

/// Applies the rate-correction multiplier to a probe result
///
/// Only non-zero rates are corrected, so fault records stay at 0.0.
fn apply_multiplier(mut record: HostRecord, multiplier: f64) -> HostRecord {
    if record.hash_rate != 0.0 {
        record.hash_rate *= multiplier;
    }
    record
}

// src/stats/aggregate.rs
use crate::types::{HostRecord, HostStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Tallied scan results for one group of rigs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GroupStats {
    /// Hosts that answered both status queries
    pub alive: usize,
    /// Hosts that were unreachable or unclassifiable (Down + Unknown)
    pub dead: usize,
    /// Hosts that actively refused the API connection
    pub refused: usize,
    /// Summed hash rate of the alive hosts, in MH/s
    pub hash_rate: f64,
}

impl GroupStats {
    /// Tallies one group's records
    pub fn tally(records: &[HostRecord]) -> Self {
        let mut stats = GroupStats::default();
        for record in records {
            stats.record(record);
        }
        stats
    }

    /// Folds one record into the counters
    ///
    /// Only Running records contribute to the hash rate total.
    fn record(&mut self, record: &HostRecord) {
        match record.status {
            HostStatus::Running => {
                self.alive += 1;
                self.hash_rate += record.hash_rate;
            }
            HostStatus::ConnectionRefused => self.refused += 1,
            HostStatus::Down | HostStatus::Unknown => self.dead += 1,
        }
    }

    /// Adds another group's counters into these
    fn absorb(&mut self, other: &GroupStats) {
        self.alive += other.alive;
        self.dead += other.dead;
        self.refused += other.refused;
        self.hash_rate += other.hash_rate;
    }
}

/// Fleet-wide scan summary: per-group tallies plus a total row
///
/// Derived fresh from each run's records and never persisted. Groups
/// are keyed by their configured labels in sorted order, so rendering
/// is deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FleetSummary {
    /// Tallies keyed by group label
    pub per_group: BTreeMap<String, GroupStats>,
    /// Sum of all per-group tallies
    pub total: GroupStats,
}

/// Summarizes the records of every scanned group
///
/// Pure function of its input: no I/O, no hidden state. Per group,
/// `alive + dead + refused` equals the number of records, which in turn
/// equals the number of non-excluded addresses scanned for that group.
pub fn summarize(groups: &BTreeMap<String, Vec<HostRecord>>) -> FleetSummary {
    let mut summary = FleetSummary::default();
    for (name, records) in groups {
        let stats = GroupStats::tally(records);
        summary.total.absorb(&stats);
        summary.per_group.insert(name.clone(), stats);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn running(last_octet: u8, rate: f64) -> HostRecord {
        HostRecord::running(
            Ipv4Addr::new(10, 0, 0, last_octet),
            rate,
            "stratum+tcp://x".into(),
            "w".into(),
        )
    }

    fn fault(last_octet: u8, status: HostStatus) -> HostRecord {
        HostRecord::fault(Ipv4Addr::new(10, 0, 0, last_octet), status)
    }

    #[test]
    fn test_summarize_two_groups() {
        let mut groups = BTreeMap::new();
        groups.insert(
            "a".to_string(),
            vec![
                running(1, 10.0),
                running(2, 20.0),
                running(3, 30.0),
                fault(4, HostStatus::ConnectionRefused),
            ],
        );
        groups.insert(
            "b".to_string(),
            vec![running(1, 5.0), running(2, 5.0)],
        );

        let summary = summarize(&groups);

        let a = &summary.per_group["a"];
        assert_eq!((a.alive, a.dead, a.refused), (3, 0, 1));
        assert_eq!(a.hash_rate, 60.0);

        let b = &summary.per_group["b"];
        assert_eq!((b.alive, b.dead, b.refused), (2, 0, 0));
        assert_eq!(b.hash_rate, 10.0);

        let total = &summary.total;
        assert_eq!((total.alive, total.dead, total.refused), (5, 0, 1));
        assert_eq!(total.hash_rate, 70.0);
    }

    #[test]
    fn test_down_and_unknown_both_count_as_dead() {
        let records = vec![
            fault(1, HostStatus::Down),
            fault(2, HostStatus::Unknown),
            running(3, 1.5),
        ];
        let stats = GroupStats::tally(&records);
        assert_eq!((stats.alive, stats.dead, stats.refused), (1, 2, 0));
        assert_eq!(stats.alive + stats.dead + stats.refused, records.len());
    }

    #[test]
    fn test_summarize_empty_input() {
        let summary = summarize(&BTreeMap::new());
        assert!(summary.per_group.is_empty());
        assert_eq!(summary.total, GroupStats::default());
    }
}

// src/report/render.rs

//! Report rendering implementation
//!
//! Turns host records and the fleet summary into an aligned plain-text
//! table (for humans) and a CSV document (for machines). Column headers
//! are explicit renderer state rather than global constants, so callers
//! can swap them without touching the aggregation pipeline.
use crate::stats::FleetSummary;
use crate::types::HostRecord;

/// Label of the fleet-wide summary row
const TOTAL_LABEL: &str = "Total";

/// Renders host and summary reports with a fixed set of headers
///
/// The defaults match the document layout downstream consumers expect;
/// construct with [`Renderer::new`] to override them.
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Column headers of the per-host report
    host_header: Vec<String>,
    /// Column headers of the summary report
    summary_header: Vec<String>,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(
            ["Device IP", "Status", "Hashrate (MH/s)", "Active Pool", "Account"],
            ["Devices type", "Alive", "Dead", "Connection refused", "Hashrate (MH/s)"],
        )
    }
}

impl Renderer {
    /// Creates a renderer with explicit headers
    ///
    /// # Arguments
    /// * `host_header` - Five columns for the per-host report
    /// * `summary_header` - Five columns for the summary report
    pub fn new<S: Into<String>>(host_header: [S; 5], summary_header: [S; 5]) -> Self {
        Renderer {
            host_header: host_header.into_iter().map(Into::into).collect(),
            summary_header: summary_header.into_iter().map(Into::into).collect(),
        }
    }

    /// Renders the per-host records as an aligned text table
    pub fn host_table(&self, records: &[HostRecord]) -> String {
        table(&self.host_header, &host_rows(records))
    }

    /// Renders the per-host records as a CSV document
    pub fn host_csv(&self, records: &[HostRecord]) -> String {
        csv(&self.host_header, &host_rows(records))
    }

    /// Renders the fleet summary as an aligned text table
    ///
    /// One row per group in label order, then the total row.
    pub fn summary_table(&self, summary: &FleetSummary) -> String {
        table(&self.summary_header, &summary_rows(summary))
    }

    /// Renders the fleet summary as a CSV document
    pub fn summary_csv(&self, summary: &FleetSummary) -> String {
        csv(&self.summary_header, &summary_rows(summary))
    }
}

fn host_rows(records: &[HostRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            vec![
                record.ip.to_string(),
                record.status.to_string(),
                format!("{:.2}", record.hash_rate),
                record.pool_url.clone(),
                record.pool_user.clone(),
            ]
        })
        .collect()
}

fn summary_rows(summary: &FleetSummary) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = summary
        .per_group
        .iter()
        .map(|(name, stats)| {
            vec![
                name.clone(),
                stats.alive.to_string(),
                stats.dead.to_string(),
                stats.refused.to_string(),
                format!("{:.2}", stats.hash_rate),
            ]
        })
        .collect();
    rows.push(vec![
        TOTAL_LABEL.to_string(),
        summary.total.alive.to_string(),
        summary.total.dead.to_string(),
        summary.total.refused.to_string(),
        format!("{:.2}", summary.total.hash_rate),
    ]);
    rows
}

/// Lays out header and rows as space-padded columns
fn table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(String::len).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    render_row(&mut out, header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, &rule, &widths);
    for row in rows {
        render_row(&mut out, row, &widths);
    }
    out
}

fn render_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<1$}", cell, *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn csv(header: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    push_csv_row(&mut out, header);
    for row in rows {
        push_csv_row(&mut out, row);
    }
    out
}

fn push_csv_row(out: &mut String, cells: &[String]) {
    let line: Vec<String> = cells.iter().map(|cell| csv_field(cell)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

/// Quotes a field when it contains a separator, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::summarize;
    use crate::types::{HostRecord, HostStatus};
    use std::collections::BTreeMap;
    use std::net::Ipv4Addr;

    fn sample_records() -> Vec<HostRecord> {
        vec![
            HostRecord::running(
                Ipv4Addr::new(10, 0, 0, 1),
                120.5,
                "stratum+tcp://x".into(),
                "worker1".into(),
            ),
            HostRecord::fault(Ipv4Addr::new(10, 0, 0, 2), HostStatus::ConnectionRefused),
        ]
    }

    #[test]
    fn test_host_csv_header_and_rows() {
        let csv = Renderer::default().host_csv(&sample_records());
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Device IP,Status,Hashrate (MH/s),Active Pool,Account")
        );
        assert_eq!(
            lines.next(),
            Some("10.0.0.1,Running,120.50,stratum+tcp://x,worker1")
        );
        assert_eq!(lines.next(), Some("10.0.0.2,Connection refused,0.00,-,-"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_summary_csv_has_total_row() {
        let mut groups = BTreeMap::new();
        groups.insert("lynx".to_string(), sample_records());
        let csv = Renderer::default().summary_csv(&summarize(&groups));

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Devices type,Alive,Dead,Connection refused,Hashrate (MH/s)")
        );
        assert_eq!(lines.next(), Some("lynx,1,0,1,120.50"));
        assert_eq!(lines.next(), Some("Total,1,0,1,120.50"));
    }

    #[test]
    fn test_host_table_aligns_columns() {
        let text = Renderer::default().host_table(&sample_records());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Device IP"));
        assert!(lines[1].starts_with("---------"));
        // Status column starts at the same offset in every row.
        let offset = lines[0].find("Status").unwrap();
        assert_eq!(&lines[2][offset..offset + 7], "Running");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}

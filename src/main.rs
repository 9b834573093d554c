// src/main.rs
use clap::Parser;
use rig_monitor_rs::network::DeviceClient;
use rig_monitor_rs::scanner::Prober;
use rig_monitor_rs::types::HostRecord;
use rig_monitor_rs::{self, *};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Main entry point for the fleet monitor
///
/// # Returns
/// - `Ok(())` on successful execution
/// - `Err(MonitorError)` if any operation fails
///
/// # Flow
/// 1. Parses command line arguments
/// 2. Delegates to appropriate subcommand handler
/// 3. Propagates any errors upward
fn main() -> Result<(), MonitorError> {
    let cli = cli::Commands::parse();

    match cli.action {
        cli::Action::Scan(opts) => run_scan(opts),
        cli::Action::Probe(opts) => run_probe(opts),
        cli::Action::Config(opts) => generate_config(opts),
    }
}

/// Runs the full fleet scan and renders the reports
///
/// # Arguments
/// * `opts` - Command line options for the scan
///
/// # Operations
/// 1. Initializes logging
/// 2. Loads configuration and applies CLI overrides
/// 3. Scans every group's ranges and aggregates the records
/// 4. Prints both reports, optionally writes CSVs and notifies
fn run_scan(opts: cli::ScanOptions) -> Result<(), MonitorError> {
    utils::init_logging();

    let mut config = config::load(&opts.config)?;
    // Apply CLI overrides
    if let Some(workers) = opts.workers {
        config.concurrency = workers;
    }

    let rt = Runtime::new()?;
    let groups = rt.block_on(scan_fleet(&config));
    let summary = stats::summarize(&groups);

    let renderer = report::Renderer::default();
    for (name, records) in &groups {
        println!("{}", name);
        println!("{}", renderer.host_table(records));
    }
    println!("{}", renderer.summary_table(&summary));

    let all_records: Vec<HostRecord> = groups.values().flatten().cloned().collect();
    let hosts_csv = renderer.host_csv(&all_records);
    let summary_csv = renderer.summary_csv(&summary);

    if let Some(dir) = &opts.csv_dir {
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join("hosts.csv"), &hosts_csv)?;
        std::fs::write(dir.join("summary.csv"), &summary_csv)?;
        log::info!("CSV reports written to {}", dir.display());
    }

    if opts.notify {
        let notify_config = config.notify.as_ref().ok_or_else(|| {
            MonitorError::ConfigError("--notify requires a [notify] config section".to_string())
        })?;
        let mut notification =
            notify::Notification::new(notify_config, renderer.summary_table(&summary));
        notification.attach("hosts.csv", hosts_csv)?;
        notification.attach("summary.csv", summary_csv)?;
        notify::LogNotifier.deliver(&notification)?;
    }

    Ok(())
}

/// Scans every configured group, one range at a time
///
/// A range whose request fails validation is logged and skipped; the
/// remaining ranges and groups still run. Per-host faults are already
/// data by the time they arrive here.
async fn scan_fleet(config: &Config) -> BTreeMap<String, Vec<HostRecord>> {
    let mut groups = BTreeMap::new();
    for group in &config.groups {
        let mut records = Vec::new();
        for range in &group.ranges {
            let request = range.to_request(group.multiplier);
            let client =
                DeviceClient::new(config.port, Duration::from_millis(config.timeout_ms));
            let mut scanner = Scanner::new(Prober::new(client), config.concurrency);
            if let Some(secs) = config.deadline_secs {
                scanner = scanner.with_deadline(Duration::from_secs(secs));
            }

            match scanner.scan(&request).await {
                Ok(batch) => records.extend(batch),
                Err(e) => log::error!(
                    "Skipping range {} +{} in group {}: {}",
                    request.start,
                    request.range_size,
                    group.name,
                    e
                ),
            }
        }
        groups.insert(group.name.clone(), records);
    }
    groups
}

/// Probes a single device and prints its record as JSON
///
/// # Arguments
/// * `opts` - Address, port and timeout for the probe
fn run_probe(opts: cli::ProbeOptions) -> Result<(), MonitorError> {
    utils::init_logging();

    let rt = Runtime::new()?;
    let record = rt.block_on(async {
        let client = DeviceClient::new(opts.port, Duration::from_millis(opts.timeout_ms));
        Prober::new(client).probe(opts.address).await
    });

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Generates configuration template file
///
/// # Arguments
/// * `opts` - Configuration generation options
///
/// # Operations
/// 1. Generates template content based on options
/// 2. Writes template to specified output file
fn generate_config(opts: cli::ConfigOptions) -> Result<(), MonitorError> {
    let config = config::generate_template(opts.notify);
    std::fs::write(opts.output, config)?;
    Ok(())
}

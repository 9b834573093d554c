// src/cli/commands.rs
use crate::network::device::DEFAULT_API_PORT;
use clap::{Parser, Subcommand};
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Rig fleet monitor - scans mining rigs and reports fleet health
#[derive(Parser, Debug)]
#[command(name = "rig-monitor")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// The action to perform (scan the fleet, probe one device, or generate config)
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands for the monitor application
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Scan every configured group and print the fleet report
    Scan(ScanOptions),

    /// Probe a single device and print its record
    Probe(ProbeOptions),

    /// Generate configuration file template
    Config(ConfigOptions),
}

/// Options for running a full fleet scan
#[derive(Parser, Debug)]
pub struct ScanOptions {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Number of concurrent probes (overrides config)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Directory to write hosts.csv and summary.csv into
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// Hand the rendered report to the notifier
    #[arg(long)]
    pub notify: bool,
}

/// Options for probing one device
#[derive(Parser, Debug)]
pub struct ProbeOptions {
    /// Address of the device to probe
    pub address: Ipv4Addr,

    /// TCP port of the device status API
    #[arg(short, long, default_value_t = DEFAULT_API_PORT)]
    pub port: u16,

    /// Per-query socket timeout in milliseconds
    #[arg(short, long, default_value_t = 5000)]
    pub timeout_ms: u64,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "config.toml")]
    pub output: PathBuf,

    /// Include the report distribution section
    #[arg(short, long)]
    pub notify: bool,
}

// src/config/config.rs
use crate::network::device::DEFAULT_API_PORT;
use crate::notify::NotifyConfig;
use crate::scanner::range::{CONCURRENCY_CEILING, ScanRequest};
use crate::utils::error::MonitorError;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Main configuration structure for the fleet monitor
///
/// Contains the scan settings shared by every probe plus the group and
/// range definitions that make up the fleet. Arrives already validated
/// as far as TOML structure goes; range constraints are checked per
/// request when a scan starts.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// TCP port the device status API listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-query socket timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Number of concurrent probes per scan
    /// (default: scaled from CPU count, capped at the ceiling)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Optional wall-clock bound in seconds for each range scan
    #[serde(default)]
    pub deadline_secs: Option<u64>,

    /// Fleet groups, scanned and reported in the order given
    #[serde(rename = "group")]
    pub groups: Vec<GroupConfig>,

    /// Report distribution addressing (omit to skip notification)
    #[serde(default)]
    pub notify: Option<NotifyConfig>,
}

/// One named group of rigs (e.g. "lynx")
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Group label used in summary rows
    pub name: String,

    /// Hash-rate correction factor for this group's hardware
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Address ranges belonging to this group
    #[serde(rename = "range")]
    pub ranges: Vec<RangeConfig>,
}

/// One address range inside a group
#[derive(Debug, Serialize, Deserialize)]
pub struct RangeConfig {
    /// First address of the range
    pub start: Ipv4Addr,

    /// Number of consecutive addresses to scan
    pub size: u8,

    /// Addresses inside the range that must not be probed
    #[serde(default)]
    pub excluded: Vec<Ipv4Addr>,
}

impl RangeConfig {
    /// Builds the scan request for this range
    ///
    /// # Arguments
    /// * `multiplier` - The owning group's rate-correction factor
    pub fn to_request(&self, multiplier: f64) -> ScanRequest {
        ScanRequest {
            start: self.start,
            range_size: self.size,
            excluded: self.excluded.iter().copied().collect(),
            multiplier,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_API_PORT
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_concurrency() -> usize {
    (num_cpus::get() * 4).min(CONCURRENCY_CEILING)
}

fn default_multiplier() -> f64 {
    1.0
}

impl Config {
    /// Loads configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(MonitorError)` - If file couldn't be read or parsed
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, MonitorError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            MonitorError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&config_str)
            .map_err(|e| MonitorError::ConfigError(format!("Invalid config format: {}", e)))
    }

    /// Generates a configuration template string
    ///
    /// # Arguments
    /// * `notify` - Include the report distribution section
    ///
    /// # Returns
    /// String containing a commented TOML configuration template
    pub fn generate_template(notify: bool) -> String {
        let mut template = String::new();
        template.push_str("# Rig fleet monitor configuration\n\n");
        template.push_str("# TCP port of the device status API\n");
        template.push_str("port = 4028\n");
        template.push_str("# Per-query socket timeout in milliseconds\n");
        template.push_str("timeout_ms = 5000\n");
        template.push_str("# Concurrent probes per scan\n");
        template.push_str("concurrency = 32\n");
        template.push_str("# Optional wall-clock bound per range scan, in seconds\n");
        template.push_str("# deadline_secs = 120\n\n");

        template.push_str("# One [[group]] per fleet, one [[group.range]] per address range\n");
        template.push_str("[[group]]\n");
        template.push_str("name = \"lynx\"\n");
        template.push_str("# Rate correction for hardware that misreports its hash rate\n");
        template.push_str("multiplier = 1.0\n\n");
        template.push_str("[[group.range]]\n");
        template.push_str("start = \"192.168.0.10\"\n");
        template.push_str("size = 40\n");
        template.push_str("excluded = [\"192.168.0.13\"]\n");

        if notify {
            template.push_str("\n# Report distribution\n");
            template.push_str("[notify]\n");
            template.push_str("from = \"monitor@example.com\"\n");
            template.push_str("to = [\"ops@example.com\"]\n");
            template.push_str("subject = \"Mining fleet status report\"\n");
        }

        template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_back_into_config() {
        let config: Config = toml::from_str(&Config::generate_template(true)).unwrap();
        assert_eq!(config.port, 4028);
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.groups[0].name, "lynx");
        assert_eq!(config.groups[0].ranges[0].size, 40);
        assert_eq!(config.notify.unwrap().to, ["ops@example.com"]);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = toml::from_str(
            r#"
            [[group]]
            name = "attic"
            [[group.range]]
            start = "10.1.1.1"
            size = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.port, DEFAULT_API_PORT);
        assert_eq!(config.timeout_ms, 5000);
        assert!(config.concurrency >= 1 && config.concurrency <= CONCURRENCY_CEILING);
        assert!(config.deadline_secs.is_none());
        assert!(config.notify.is_none());
        assert_eq!(config.groups[0].multiplier, 1.0);
        assert!(config.groups[0].ranges[0].excluded.is_empty());
    }

    #[test]
    fn test_range_config_builds_request() {
        let range = RangeConfig {
            start: Ipv4Addr::new(10, 0, 0, 5),
            size: 20,
            excluded: vec![Ipv4Addr::new(10, 0, 0, 9)],
        };
        let request = range.to_request(9.0);
        assert_eq!(request.start, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(request.range_size, 20);
        assert!(request.excluded.contains(&Ipv4Addr::new(10, 0, 0, 9)));
        assert_eq!(request.multiplier, 9.0);
        assert!(request.validate().is_ok());
    }
}

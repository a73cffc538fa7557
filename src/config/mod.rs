//! Network Monitor Configuration
//!
//! Operator-tunable settings loaded from a TOML file, with clamping
//! validation so an out-of-range value degrades to the nearest valid one
//! instead of failing startup.
//!
//! ## Loading Order
//!
//! 1. `BANDWATCH_CONFIG` environment variable (path to TOML file)
//! 2. `bandwatch.toml` in the current working directory
//! 3. Built-in defaults

pub mod defaults;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use defaults::{
    DEFAULT_DEVICE_COUNT_MAX, DEFAULT_DEVICE_COUNT_MIN, DEFAULT_RETENTION_WINDOW_HOURS,
    DEFAULT_TICK_PERIOD_SECS, DEFAULT_TOTAL_BANDWIDTH_MBPS, TICK_PERIOD_MAX_SECS,
    TICK_PERIOD_MIN_SECS, TOTAL_BANDWIDTH_MAX_MBPS, TOTAL_BANDWIDTH_MIN_MBPS,
};

/// Errors raised while reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root configuration for a monitoring session.
///
/// Load with [`NetworkConfig::load`], then call [`validate`](Self::validate)
/// once before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Bandwidth budget and monitor timing.
    #[serde(default)]
    pub network: NetworkSection,

    /// Mock fleet generation hints.
    #[serde(default)]
    pub devices: DeviceSection,
}

/// `[network]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    /// Shared bandwidth budget to partition each tick (Mbps), valid [100, 1000].
    pub total_bandwidth_mbps: f64,

    /// Monitor tick period (seconds), valid [1, 60].
    pub tick_period_secs: u64,

    /// Rolling history retention window (hours).
    pub retention_window_hours: u64,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            total_bandwidth_mbps: DEFAULT_TOTAL_BANDWIDTH_MBPS,
            tick_period_secs: DEFAULT_TICK_PERIOD_SECS,
            retention_window_hours: DEFAULT_RETENTION_WINDOW_HOURS,
        }
    }
}

/// `[devices]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSection {
    /// Smallest generated fleet size.
    pub count_min: usize,

    /// Largest generated fleet size.
    pub count_max: usize,
}

impl Default for DeviceSection {
    fn default() -> Self {
        Self {
            count_min: DEFAULT_DEVICE_COUNT_MIN,
            count_max: DEFAULT_DEVICE_COUNT_MAX,
        }
    }
}

impl NetworkConfig {
    /// Load configuration using the standard search order:
    /// 1. `BANDWATCH_CONFIG` environment variable
    /// 2. `./bandwatch.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("BANDWATCH_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from BANDWATCH_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from BANDWATCH_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "BANDWATCH_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("bandwatch.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./bandwatch.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./bandwatch.toml, using defaults");
                }
            }
        }

        info!("No bandwatch.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Clamp every field into its valid range, logging each correction.
    ///
    /// Out-of-range settings degrade to the nearest valid value; this never
    /// fails.
    #[must_use]
    pub fn validate(mut self) -> Self {
        let bw = self.network.total_bandwidth_mbps;
        if !(TOTAL_BANDWIDTH_MIN_MBPS..=TOTAL_BANDWIDTH_MAX_MBPS).contains(&bw) || bw.is_nan() {
            let clamped = if bw.is_nan() {
                DEFAULT_TOTAL_BANDWIDTH_MBPS
            } else {
                bw.clamp(TOTAL_BANDWIDTH_MIN_MBPS, TOTAL_BANDWIDTH_MAX_MBPS)
            };
            warn!(
                configured = bw,
                clamped, "total_bandwidth_mbps out of range, clamped"
            );
            self.network.total_bandwidth_mbps = clamped;
        }

        let tick = self.network.tick_period_secs;
        if !(TICK_PERIOD_MIN_SECS..=TICK_PERIOD_MAX_SECS).contains(&tick) {
            let clamped = tick.clamp(TICK_PERIOD_MIN_SECS, TICK_PERIOD_MAX_SECS);
            warn!(
                configured = tick,
                clamped, "tick_period_secs out of range, clamped"
            );
            self.network.tick_period_secs = clamped;
        }

        if self.network.retention_window_hours == 0 {
            warn!("retention_window_hours must be at least 1, clamped");
            self.network.retention_window_hours = 1;
        }

        if self.devices.count_min == 0 {
            warn!("devices.count_min must be at least 1, clamped");
            self.devices.count_min = 1;
        }
        if self.devices.count_max < self.devices.count_min {
            warn!(
                count_min = self.devices.count_min,
                count_max = self.devices.count_max,
                "devices.count_max below count_min, raised to count_min"
            );
            self.devices.count_max = self.devices.count_min;
        }

        self
    }

    /// Monitor tick period as a [`Duration`].
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(self.network.tick_period_secs)
    }

    /// History retention window as a [`chrono::Duration`].
    pub fn retention_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.network.retention_window_hours as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = NetworkConfig::default();
        assert_eq!(config.network.total_bandwidth_mbps, 500.0);
        assert_eq!(config.network.tick_period_secs, 1);
        assert_eq!(config.network.retention_window_hours, 24);
        assert_eq!(config.devices.count_min, 8);
        assert_eq!(config.devices.count_max, 15);
    }

    #[test]
    fn test_validate_clamps_bandwidth() {
        let mut config = NetworkConfig::default();
        config.network.total_bandwidth_mbps = 5000.0;
        let config = config.validate();
        assert_eq!(config.network.total_bandwidth_mbps, 1000.0);

        let mut config = NetworkConfig::default();
        config.network.total_bandwidth_mbps = -20.0;
        let config = config.validate();
        assert_eq!(config.network.total_bandwidth_mbps, 100.0);
    }

    #[test]
    fn test_validate_clamps_tick_period() {
        let mut config = NetworkConfig::default();
        config.network.tick_period_secs = 0;
        let config = config.validate();
        assert_eq!(config.network.tick_period_secs, 1);

        let mut config = NetworkConfig::default();
        config.network.tick_period_secs = 3600;
        let config = config.validate();
        assert_eq!(config.network.tick_period_secs, 60);
    }

    #[test]
    fn test_validate_fixes_device_counts() {
        let mut config = NetworkConfig::default();
        config.devices.count_min = 10;
        config.devices.count_max = 4;
        let config = config.validate();
        assert_eq!(config.devices.count_max, 10);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[network]\ntotal_bandwidth_mbps = 750.0\ntick_period_secs = 5\n"
        )
        .unwrap();

        let config = NetworkConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.network.total_bandwidth_mbps, 750.0);
        assert_eq!(config.network.tick_period_secs, 5);
        // Unset sections fall back to defaults
        assert_eq!(config.network.retention_window_hours, 24);
        assert_eq!(config.devices.count_min, 8);
    }

    #[test]
    fn test_load_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml = = =").unwrap();
        assert!(NetworkConfig::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_duration_helpers() {
        let config = NetworkConfig::default();
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.retention_window(), chrono::Duration::hours(24));
    }
}
